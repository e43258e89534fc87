//! Low-level building blocks for custom sweeps.
//!
//! These expose the rotations, the row kernels and the candidate comparator
//! used by [`Deskewer`](crate::Deskewer). Most users should prefer the
//! top-level `Deskewer` and `deskew` API.

pub use crate::kernel::scalar::RowSumScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::RowSumSimd;
pub use crate::kernel::{DefaultRowKernel, RowKernel};
pub use crate::rotate::{expanded_size, rotate_expand, rotate_replicate};
pub use crate::search::{evaluate_angle, replaces, select_best, WHITE};
