//! Row-energy scoring and candidate selection.

use crate::kernel::{DefaultRowKernel, RowKernel};
use crate::util::math::variance_u64;
use crate::ImageView;

/// Variance of the horizontal projection (per-row intensity sums).
///
/// Aligned text lines make the row sums alternate between background and ink,
/// which maximizes this value; residual skew smears ink across rows and
/// lowers it. A uniform image scores exactly 0.
pub fn row_energy(image: ImageView<'_, u8>) -> f64 {
    let sums = DefaultRowKernel::row_sums(image);
    variance_u64(&sums)
}

/// One evaluated rotation hypothesis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Rotation applied before scoring, in degrees.
    pub angle_deg: f32,
    /// Row energy of the rotated image.
    pub score: f64,
}

/// Returns true when `challenger` should replace `incumbent`.
///
/// Only a strictly greater score wins. Candidates are visited in ascending
/// angle order, so equal scores keep the lower angle.
#[inline]
pub fn replaces(challenger: &Candidate, incumbent: &Candidate) -> bool {
    challenger.score > incumbent.score
}

/// Folds candidates (in ascending angle order) down to the best one.
pub fn select_best<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates.into_iter().fold(None, |best, next| match best {
        Some(incumbent) if !replaces(&next, &incumbent) => Some(incumbent),
        _ => Some(next),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(angle_deg: f32, score: f64) -> Candidate {
        Candidate { angle_deg, score }
    }

    #[test]
    fn uniform_image_has_zero_energy() {
        let data = vec![255u8; 40 * 30];
        let view = ImageView::from_slice(&data, 40, 30).unwrap();
        assert_eq!(row_energy(view), 0.0);
    }

    #[test]
    fn alternating_rows_energy() {
        // Row sums alternate between 0 and 4 * 255.
        let mut data = vec![0u8; 4 * 6];
        for y in (1..6).step_by(2) {
            data[y * 4..y * 4 + 4].fill(255);
        }
        let view = ImageView::from_slice(&data, 4, 6).unwrap();
        let half = 2.0 * 255.0;
        assert!((row_energy(view) - half * half).abs() < 1e-9);
    }

    #[test]
    fn strict_comparator_keeps_incumbent_on_tie() {
        assert!(!replaces(&cand(1.0, 5.0), &cand(-1.0, 5.0)));
        assert!(replaces(&cand(1.0, 5.5), &cand(-1.0, 5.0)));
    }

    #[test]
    fn select_best_prefers_first_of_equal_maxima() {
        let best = select_best([cand(-2.0, 1.0), cand(-1.0, 3.0), cand(0.0, 2.0), cand(1.0, 3.0)]);
        assert_eq!(best, Some(cand(-1.0, 3.0)));
    }

    #[test]
    fn select_best_all_zero_returns_first() {
        let best = select_best([cand(-5.0, 0.0), cand(0.0, 0.0), cand(5.0, 0.0)]);
        assert_eq!(best.map(|c| c.angle_deg), Some(-5.0));
        assert_eq!(select_best(std::iter::empty()), None);
    }
}
