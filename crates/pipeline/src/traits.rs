//! Core traits for the ranking strategies.
//!
//! This module defines the Strategy trait every query category implements,
//! and the borrowed [`Ranked`] entry strategies produce.

use crate::error::Result;
use crate::query::QuerySpec;
use crate::views::MovieView;
use data_loader::MovieRecord;

/// One catalog record in a strategy's output, with the score it was ranked by.
///
/// Entries borrow from the snapshot; nothing is copied until the final page
/// is projected into views.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub movie: &'a MovieRecord,
    pub score: Option<f64>,
}

impl<'a> Ranked<'a> {
    pub fn unscored(movie: &'a MovieRecord) -> Self {
        Self { movie, score: None }
    }

    pub fn scored(movie: &'a MovieRecord, score: f64) -> Self {
        Self {
            movie,
            score: Some(score),
        }
    }
}

/// Core trait for query strategies.
///
/// ## Design Note
/// - `rank` sees the whole snapshot and returns the complete filtered and
///   ordered result; pagination happens afterwards in the engine
/// - `project` builds the response view for one entry of the final page
/// - `Send + Sync` lets the same strategy serve concurrent queries
pub trait Strategy: Send + Sync {
    /// Returns the name of this strategy (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Filter, score and order the snapshot for this query.
    ///
    /// # Returns
    /// * `Ok(Vec<Ranked>)` - Every matching record, in result order
    /// * `Err` - If the query cannot be answered from this snapshot
    fn rank<'a>(&self, snapshot: &'a [MovieRecord], query: &QuerySpec) -> Result<Vec<Ranked<'a>>>;

    /// Build the response shape for one ranked entry
    fn project(&self, ranked: Ranked<'_>) -> MovieView;
}
