//! SIMD row-sum kernel using the `wide` crate.
//!
//! Rows are accumulated 8 pixels at a time in `u32x8` lanes. A lane gains at
//! most 255 per chunk, so it cannot overflow for any row shorter than
//! `8 * u32::MAX / 255` pixels; the lanes are widened to `u64` per row.

use crate::kernel::RowKernel;
use crate::ImageView;
use wide::u32x8;

const LANES: usize = 8;

/// Load 8 u8 values and widen them to u32x8.
#[inline]
fn load_u8x8_as_u32x8(slice: &[u8]) -> u32x8 {
    u32x8::new([
        u32::from(slice[0]),
        u32::from(slice[1]),
        u32::from(slice[2]),
        u32::from(slice[3]),
        u32::from(slice[4]),
        u32::from(slice[5]),
        u32::from(slice[6]),
        u32::from(slice[7]),
    ])
}

/// Horizontal sum of u32x8, widened to u64.
#[inline]
fn hsum(v: u32x8) -> u64 {
    v.to_array().iter().map(|&lane| u64::from(lane)).sum()
}

/// SIMD-accelerated row-sum kernel.
pub struct RowSumSimd;

impl RowKernel for RowSumSimd {
    fn row_sums(image: ImageView<'_, u8>) -> Vec<u64> {
        let width = image.width();
        let simd_end = width / LANES * LANES;
        image
            .rows()
            .map(|row| {
                let mut acc = u32x8::new([0u32; LANES]);
                let mut x = 0;
                while x < simd_end {
                    acc = acc + load_u8x8_as_u32x8(&row[x..]);
                    x += LANES;
                }
                let tail: u64 = row[simd_end..].iter().map(|&v| u64::from(v)).sum();
                hsum(acc) + tail
            })
            .collect()
    }
}
