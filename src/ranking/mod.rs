//! Similarity ranking of stored articles against a query title.
//!
//! Ranking is pure and holds no state, so it can be called from any number of
//! tasks at once.

use thiserror::Error;

use crate::domain::candidate::{Candidate, ScoredCandidate};

pub mod similarity;

pub use similarity::{edit_distance, similarity};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Half-open `[start, end)` slice of a ranked sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankWindow {
    start: usize,
    end: usize,
}

impl RankWindow {
    pub fn new(start: usize, end: usize) -> Result<Self, RankingError> {
        if start > end {
            return Err(RankingError::InvalidArgument(format!(
                "window start {start} is greater than window end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The first `k` entries.
    pub fn top(k: usize) -> Self {
        Self { start: 0, end: k }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

impl Default for RankWindow {
    /// Three entries. Combined with self-exclusion this returns what used to
    /// be ranks 1..4 of the full sequence.
    fn default() -> Self {
        Self::top(3)
    }
}

/// Scores `candidates` against `query_title` and returns the requested window
/// of the descending ranking.
///
/// Equal scores keep their input order. When `exclude_self` is set the
/// top-ranked entry is dropped before the window is applied; callers must
/// only set it when the query article itself is among `candidates`
/// (e.g. its URL is present), otherwise the genuine best match is lost.
pub fn rank(
    query_title: &str,
    candidates: &[Candidate],
    exclude_self: bool,
    window_start: usize,
    window_end: usize,
) -> Result<Vec<ScoredCandidate>, RankingError> {
    let window = RankWindow::new(window_start, window_end)?;
    Ok(rank_window(query_title, candidates, exclude_self, window))
}

/// [`rank`] with an already validated window.
pub fn rank_window(
    query_title: &str,
    candidates: &[Candidate],
    exclude_self: bool,
    window: RankWindow,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|candidate| ScoredCandidate {
            similarity: similarity(query_title, &candidate.title),
            candidate: candidate.clone(),
        })
        .collect();

    // `sort_by` is stable, which keeps ties in corpus order.
    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    let skip = usize::from(exclude_self) + window.start;
    scored
        .into_iter()
        .skip(skip)
        .take(window.end - window.start)
        .collect()
}
