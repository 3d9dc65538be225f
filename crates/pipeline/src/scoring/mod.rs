//! Scoring functions used by the ranking strategies.
//!
//! Both scorers are pure functions of the records they are given: no state,
//! no side effects, same inputs give the same score.

pub mod popularity;
pub mod similarity;

pub use popularity::popularity;
pub use similarity::{SimilarityBreakdown, cast_overlap, genre_overlap, rating_delta, similarity};

/// Mean of a rating list, defined as 0.0 for an empty list
pub fn average_rating(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total: f64 = ratings.iter().sum();
    total / ratings.len() as f64
}
