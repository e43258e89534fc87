//! Exhaustive angle sweep.
//!
//! Every candidate is rotated with edge replication (same size as the input)
//! and scored independently. The sequential and parallel sweeps both return
//! the candidates in ascending angle order, so the fold that picks the best
//! one sees the same sequence either way.

use crate::rotate::{rotate_replicate, Interpolation};
use crate::search::angles::AngleRange;
use crate::search::score::{row_energy, Candidate};
use crate::trace::{trace_event, trace_span};
use crate::ImageView;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Rotates `image` by `angle_deg` and scores the result.
pub fn evaluate_angle(image: ImageView<'_, u8>, angle_deg: f32, interp: Interpolation) -> Candidate {
    let rotated = rotate_replicate(image, angle_deg, interp);
    Candidate {
        angle_deg,
        score: row_energy(rotated.view()),
    }
}

pub(crate) fn sweep(image: ImageView<'_, u8>, range: &AngleRange, interp: Interpolation) -> Vec<Candidate> {
    let _span = trace_span!("angle_sweep", candidates = range.len(), parallel = false).entered();
    let table: Vec<Candidate> = range
        .iter()
        .map(|angle| evaluate_angle(image, angle, interp))
        .collect();
    trace_event!("sweep_done", evaluated = table.len());
    table
}

/// Parallel sweep over candidates (rayon).
///
/// `collect` on an indexed parallel iterator preserves input order.
#[cfg(feature = "rayon")]
pub(crate) fn sweep_par(
    image: ImageView<'_, u8>,
    range: &AngleRange,
    interp: Interpolation,
) -> Vec<Candidate> {
    let _span = trace_span!("angle_sweep", candidates = range.len(), parallel = true).entered();
    let table: Vec<Candidate> = (0..range.len())
        .into_par_iter()
        .map(|idx| evaluate_angle(image, range.angle_at(idx), interp))
        .collect();
    trace_event!("sweep_done", evaluated = table.len());
    table
}
