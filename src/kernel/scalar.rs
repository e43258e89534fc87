//! Scalar reference row-sum kernel.

use crate::kernel::RowKernel;
use crate::ImageView;

/// Scalar row-sum kernel.
pub struct RowSumScalar;

impl RowKernel for RowSumScalar {
    fn row_sums(image: ImageView<'_, u8>) -> Vec<u64> {
        image
            .rows()
            .map(|row| row.iter().map(|&v| u64::from(v)).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_each_row_and_skips_padding() {
        let data = [1u8, 2, 3, 200, 255, 255, 255, 200];
        let view = ImageView::new(&data, 3, 2, 4).unwrap();
        assert_eq!(RowSumScalar::row_sums(view), vec![6, 765]);
    }
}
