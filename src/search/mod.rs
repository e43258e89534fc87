//! Skew estimation and correction.
//!
//! The estimator sweeps a closed range of candidate angles, rotates the
//! grayscale image by each one (same size, edge replication), scores the
//! result by the variance of its row sums and keeps the strictly best
//! candidate. The correction then rotates the original raster by the winning
//! angle onto an expanded white canvas.

pub mod angles;
pub(crate) mod score;
pub(crate) mod sweep;
mod table;

pub use angles::AngleRange;
pub use score::{replaces, row_energy, select_best, Candidate};
pub use sweep::evaluate_angle;
pub use table::ScoreTable;

use crate::image::{OwnedImage, Raster};
use crate::rotate::{rotate_expand, Interpolation};
use crate::trace::{trace_event, trace_span};
use crate::util::{DeskewError, DeskewResult};
use crate::ImageView;

/// Fill value for pixels exposed by the correction rotation.
pub const WHITE: u8 = 255;

/// Configuration for the sweep and the correction.
#[derive(Clone, Debug, PartialEq)]
pub struct DeskewConfig {
    /// Lowest candidate angle in degrees (inclusive).
    pub min_deg: f32,
    /// Highest candidate angle in degrees (inclusive when on the grid).
    pub max_deg: f32,
    /// Distance between candidates in degrees.
    pub step_deg: f32,
    /// Filter used when rotating candidates during the sweep.
    pub search_interpolation: Interpolation,
    /// Filter used for the final, canvas-expanding rotation.
    pub correction_interpolation: Interpolation,
    /// Evaluate candidates on the rayon thread pool (requires `rayon`).
    pub parallel: bool,
}

impl Default for DeskewConfig {
    fn default() -> Self {
        Self {
            min_deg: -30.0,
            max_deg: 30.0,
            step_deg: 0.5,
            search_interpolation: Interpolation::Bicubic,
            correction_interpolation: Interpolation::Nearest,
            parallel: false,
        }
    }
}

/// Outcome of the sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct SkewEstimate {
    /// Rotation that best aligns rows, in degrees; always a sweep candidate.
    pub angle_deg: f32,
    /// Row energy at `angle_deg`.
    pub score: f64,
    /// Every evaluated candidate in ascending angle order.
    pub table: ScoreTable,
}

/// Corrected raster together with the estimate that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Deskewed {
    /// The input rotated by the estimated angle onto an expanded canvas, or
    /// the unchanged input when the angle is exactly zero.
    pub raster: Raster,
    /// The sweep result.
    pub estimate: SkewEstimate,
}

impl Deskewed {
    /// Chosen rotation in degrees.
    pub fn angle_deg(&self) -> f32 {
        self.estimate.angle_deg
    }
}

/// Skew estimator bound to a validated configuration.
#[derive(Clone, Debug)]
pub struct Deskewer {
    cfg: DeskewConfig,
    range: AngleRange,
}

impl Deskewer {
    /// Validates the angle range and builds an estimator.
    pub fn new(cfg: DeskewConfig) -> DeskewResult<Self> {
        let range = AngleRange::new(cfg.min_deg, cfg.max_deg, cfg.step_deg)?;
        Ok(Self { cfg, range })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DeskewConfig {
        &self.cfg
    }

    /// Returns the candidate range.
    pub fn range(&self) -> &AngleRange {
        &self.range
    }

    /// Sweeps all candidates over a grayscale view and returns the best.
    pub fn estimate(&self, image: ImageView<'_, u8>) -> DeskewResult<SkewEstimate> {
        let entries = self.run_sweep(image);
        let best = select_best(entries.iter().copied()).ok_or(DeskewError::InvalidRange {
            min_deg: self.range.min_deg(),
            max_deg: self.range.max_deg(),
            step_deg: self.range.step_deg(),
            reason: "range produced no candidates",
        })?;
        trace_event!("best_angle", angle_deg = best.angle_deg, score = best.score);
        Ok(SkewEstimate {
            angle_deg: best.angle_deg,
            score: best.score,
            table: ScoreTable::new(entries),
        })
    }

    /// Reduces a raster to luma and estimates its skew.
    pub fn estimate_raster(&self, raster: &Raster) -> DeskewResult<SkewEstimate> {
        match raster.gray_view() {
            Some(view) => self.estimate(view),
            None => {
                let luma: OwnedImage = raster.to_luma();
                self.estimate(luma.view())
            }
        }
    }

    /// Estimates the skew of `raster` and rotates the original by it.
    ///
    /// The correction expands the canvas so no content is clipped and fills
    /// exposed pixels with white. A zero angle returns the input unchanged.
    pub fn deskew(&self, raster: &Raster) -> DeskewResult<Deskewed> {
        let _span = trace_span!(
            "deskew",
            width = raster.width(),
            height = raster.height(),
            channels = raster.format().channels()
        )
        .entered();
        let estimate = self.estimate_raster(raster)?;
        let raster = correct(raster, estimate.angle_deg, self.cfg.correction_interpolation)?;
        Ok(Deskewed { raster, estimate })
    }

    fn run_sweep(&self, image: ImageView<'_, u8>) -> Vec<Candidate> {
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return sweep::sweep_par(image, &self.range, self.cfg.search_interpolation);
            }
        }
        sweep::sweep(image, &self.range, self.cfg.search_interpolation)
    }
}

/// Rotates `raster` by `angle_deg` onto an expanded white canvas.
///
/// An angle of exactly zero returns a copy of the input without resampling.
pub fn correct(raster: &Raster, angle_deg: f32, interp: Interpolation) -> DeskewResult<Raster> {
    if angle_deg == 0.0 {
        trace_event!("correction_skipped", angle_deg = angle_deg);
        return Ok(raster.clone());
    }
    rotate_expand(raster, angle_deg, interp, WHITE)
}

/// Finds the rotation in `[min_deg, max_deg]` that best aligns the rows of a
/// grayscale image, using the default filters.
pub fn find_best_rotation(
    image: ImageView<'_, u8>,
    min_deg: f32,
    max_deg: f32,
    step_deg: f32,
) -> DeskewResult<SkewEstimate> {
    Deskewer::new(DeskewConfig {
        min_deg,
        max_deg,
        step_deg,
        ..DeskewConfig::default()
    })?
    .estimate(image)
}

/// Estimates and corrects the skew of a raster in one call.
pub fn deskew(raster: &Raster, cfg: DeskewConfig) -> DeskewResult<Deskewed> {
    Deskewer::new(cfg)?.deskew(raster)
}
