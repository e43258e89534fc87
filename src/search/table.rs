//! Ordered (angle, score) table produced by a sweep.

use crate::search::score::{select_best, Candidate};

/// Every evaluated candidate, in ascending angle order.
///
/// The table is a diagnostic side channel: plotting or reporting it never
/// feeds back into the estimate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreTable {
    entries: Vec<Candidate>,
}

impl ScoreTable {
    pub(crate) fn new(entries: Vec<Candidate>) -> Self {
        Self { entries }
    }

    /// Number of evaluated candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no candidate was evaluated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in ascending angle order.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.entries.iter()
    }

    /// Returns the entries as a slice.
    pub fn as_slice(&self) -> &[Candidate] {
        &self.entries
    }

    /// Candidate angles in sweep order.
    pub fn angles(&self) -> Vec<f32> {
        self.entries.iter().map(|c| c.angle_deg).collect()
    }

    /// Scores in sweep order.
    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|c| c.score).collect()
    }

    /// Best entry under the sweep's tie-break rule.
    pub fn best(&self) -> Option<Candidate> {
        select_best(self.entries.iter().copied())
    }

    /// Score range `(min, max)`, or `None` for an empty table.
    pub fn score_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.entries.iter().map(|c| c.score);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s))))
    }
}

impl IntoIterator for ScoreTable {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
