//! Deskew estimates and reverses the rotation of scanned or synthetic pages.
//!
//! The estimator is a projection-profile search: every candidate angle in a
//! closed range is applied to the grayscale image, the variance of the row
//! sums is taken as the alignment score and the strictly best candidate wins
//! (ties keep the lower angle). The correction rotates the original raster by
//! that angle onto an expanded white canvas.
//!
//! Candidates can be evaluated in parallel with the `rayon` feature, row sums
//! vectorized with `simd`, images loaded and saved with `image-io`, and spans
//! emitted with `tracing`.
//!
//! ```
//! use deskew::{Deskewer, DeskewConfig, PixelFormat, Raster};
//!
//! let mut data = vec![255u8; 64 * 64];
//! for y in (0..64).filter(|y| (y / 4) % 2 == 0) {
//!     data[y * 64..(y + 1) * 64].fill(0);
//! }
//! let raster = Raster::new(data, 64, 64, PixelFormat::Gray)?;
//! let deskewer = Deskewer::new(DeskewConfig { min_deg: -5.0, max_deg: 5.0, step_deg: 1.0, ..Default::default() })?;
//! let out = deskewer.deskew(&raster)?;
//! assert_eq!(out.angle_deg(), 0.0);
//! # Ok::<(), deskew::DeskewError>(())
//! ```

pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod page;
pub mod rotate;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use image::io;
pub use image::{ImageView, OwnedImage, PixelFormat, Raster};
pub use page::{compose_page, skew_page, GlyphSet, PageLayout};
pub use rotate::Interpolation;
pub use search::{
    correct, deskew, find_best_rotation, row_energy, AngleRange, Candidate, DeskewConfig,
    Deskewed, Deskewer, ScoreTable, SkewEstimate,
};
pub use util::{DeskewError, DeskewResult};
