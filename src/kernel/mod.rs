//! Row projection kernels.
//!
//! A kernel turns a grayscale view into its horizontal projection: one exact
//! intensity sum per row. The scalar kernel is the reference; the `simd`
//! feature adds a vectorized kernel that returns identical sums.

use crate::ImageView;

/// Kernel trait for computing the row-sum projection of an image.
pub trait RowKernel {
    /// Returns the sum of intensities of every row, top to bottom.
    fn row_sums(image: ImageView<'_, u8>) -> Vec<u64>;
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

/// Kernel used by the sweep: SIMD when available, scalar otherwise.
#[cfg(not(feature = "simd"))]
pub type DefaultRowKernel = scalar::RowSumScalar;
/// Kernel used by the sweep: SIMD when available, scalar otherwise.
#[cfg(feature = "simd")]
pub type DefaultRowKernel = simd::RowSumSimd;
