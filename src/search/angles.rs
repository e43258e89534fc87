//! Candidate angle enumeration for the skew sweep.

use crate::util::{DeskewError, DeskewResult};

/// Upper bound on the number of candidates a single range may produce.
pub const MAX_CANDIDATES: usize = 1_000_000;

/// Relative slack used when deciding whether `max_deg` lies on the grid.
const GRID_EPS: f64 = 1e-6;

/// Closed range of candidate angles in degrees, sampled at a fixed step.
///
/// Candidates are `min + i * step` for `i = 0..len`, where
/// `len = floor((max - min) / step) + 1`. `max` is included when it falls on
/// the grid up to floating-point error, and no candidate ever exceeds it.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleRange {
    min_deg: f32,
    max_deg: f32,
    step_deg: f32,
    len: usize,
}

impl AngleRange {
    /// Creates a range over `[min_deg, max_deg]` with a positive step.
    pub fn new(min_deg: f32, max_deg: f32, step_deg: f32) -> DeskewResult<Self> {
        let invalid = |reason| DeskewError::InvalidRange {
            min_deg,
            max_deg,
            step_deg,
            reason,
        };
        if !min_deg.is_finite() || !max_deg.is_finite() || !step_deg.is_finite() {
            return Err(invalid("non-finite range parameters"));
        }
        if step_deg <= 0.0 {
            return Err(invalid("step must be > 0"));
        }
        if min_deg > max_deg {
            return Err(invalid("min must not exceed max"));
        }

        let span = (f64::from(max_deg) - f64::from(min_deg)) / f64::from(step_deg);
        let steps = (span + GRID_EPS * span.max(1.0)).floor();
        if steps >= MAX_CANDIDATES as f64 {
            return Err(invalid("range produces too many candidates"));
        }

        Ok(Self {
            min_deg,
            max_deg,
            step_deg,
            len: steps as usize + 1,
        })
    }

    /// Single-candidate range containing only `angle_deg`.
    pub fn single(angle_deg: f32) -> DeskewResult<Self> {
        Self::new(angle_deg, angle_deg, 1.0)
    }

    /// Returns the number of candidates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a valid range has at least one candidate.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the lower bound (inclusive).
    pub fn min_deg(&self) -> f32 {
        self.min_deg
    }

    /// Returns the upper bound (inclusive).
    pub fn max_deg(&self) -> f32 {
        self.max_deg
    }

    /// Returns the step in degrees.
    pub fn step_deg(&self) -> f32 {
        self.step_deg
    }

    /// Returns the candidate at `idx`.
    pub fn angle_at(&self, idx: usize) -> f32 {
        debug_assert!(idx < self.len);
        let angle = f64::from(self.min_deg) + idx as f64 * f64::from(self.step_deg);
        (angle as f32).min(self.max_deg)
    }

    /// Iterates over all candidates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len).map(|idx| self.angle_at(idx))
    }
}
