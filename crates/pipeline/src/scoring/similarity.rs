//! Pairwise content similarity between two movies.
//!
//! ## Algorithm
//! ```text
//! genre_overlap = |G(a) ∩ G(b)| / max(|G(a)|, |G(b)|)     (sets, 0 if both empty)
//! rating_delta  = |avg(a.ratings) - avg(b.ratings)|
//! cast_overlap  = |C(a) ∩ C(b)| / max(|C(a)|, |C(b)|)     (sets, 0 if both empty)
//!
//! similarity = genre_overlap * 0.5 + rating_delta * 0.3 + cast_overlap * 0.2
//! ```
//!
//! `rating_delta` is a distance, yet it carries a positive weight. A wider
//! rating gap therefore *raises* the composite score, so the result is not a
//! true similarity measure. Thresholds and rankings built on top of it depend
//! on this exact formula, so it is kept as is.

use super::average_rating;
use data_loader::MovieRecord;
use std::collections::HashSet;

pub const GENRE_WEIGHT: f64 = 0.5;
pub const RATING_WEIGHT: f64 = 0.3;
pub const CAST_WEIGHT: f64 = 0.2;

/// The three sub-scores behind one similarity value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityBreakdown {
    pub genre_overlap: f64,
    pub rating_delta: f64,
    pub cast_overlap: f64,
}

impl SimilarityBreakdown {
    /// Compute all sub-scores of `candidate` against `reference`
    pub fn between(reference: &MovieRecord, candidate: &MovieRecord) -> Self {
        Self {
            genre_overlap: genre_overlap(reference, candidate),
            rating_delta: rating_delta(reference, candidate),
            cast_overlap: cast_overlap(reference, candidate),
        }
    }

    /// Weighted composite score
    pub fn score(&self) -> f64 {
        self.genre_overlap * GENRE_WEIGHT
            + self.rating_delta * RATING_WEIGHT
            + self.cast_overlap * CAST_WEIGHT
    }
}

/// Composite similarity of `candidate` to `reference`
pub fn similarity(reference: &MovieRecord, candidate: &MovieRecord) -> f64 {
    SimilarityBreakdown::between(reference, candidate).score()
}

/// Share of distinct genres the two movies have in common
pub fn genre_overlap(a: &MovieRecord, b: &MovieRecord) -> f64 {
    set_overlap(&a.genres, &b.genres)
}

/// Share of distinct cast members the two movies have in common
pub fn cast_overlap(a: &MovieRecord, b: &MovieRecord) -> f64 {
    set_overlap(&a.actors, &b.actors)
}

/// Absolute difference of the average ratings (0 for unrated movies)
pub fn rating_delta(a: &MovieRecord, b: &MovieRecord) -> f64 {
    (average_rating(&a.ratings) - average_rating(&b.ratings)).abs()
}

/// |A ∩ B| / max(|A|, |B|) over the distinct values of each list
fn set_overlap(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let denominator = a.len().max(b.len());
    if denominator == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn movie(genres: &[&str], actors: &[&str], ratings: Vec<f64>) -> MovieRecord {
        MovieRecord::new("m", "Movie", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
            .with_genres(genres.iter().copied())
            .with_actors(actors.iter().copied())
            .with_ratings(ratings)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_self_overlap_is_total() {
        let a = movie(&["Drama", "Crime"], &["Sam Taylor", "Ana Ruiz"], vec![7.0, 8.0]);
        let breakdown = SimilarityBreakdown::between(&a, &a);
        assert_eq!(breakdown.genre_overlap, 1.0);
        assert_eq!(breakdown.cast_overlap, 1.0);
        assert_eq!(breakdown.rating_delta, 0.0);
        assert_close(breakdown.score(), 0.7);
    }

    #[test]
    fn test_overlap_uses_larger_list_as_denominator() {
        let a = movie(&["Drama", "Crime", "Thriller", "Mystery"], &[], vec![]);
        let b = movie(&["Drama", "Crime"], &[], vec![]);
        assert_close(genre_overlap(&a, &b), 0.5);
        assert_close(genre_overlap(&b, &a), 0.5);
    }

    #[test]
    fn test_duplicates_counted_once() {
        let a = movie(&["Drama", "Drama", "Crime"], &["Sam Taylor", "Sam Taylor"], vec![]);
        let b = movie(&["Drama", "Crime"], &["Sam Taylor"], vec![]);
        assert_eq!(genre_overlap(&a, &b), 1.0);
        assert_eq!(cast_overlap(&a, &b), 1.0);
    }

    #[test]
    fn test_empty_lists_score_zero() {
        let a = movie(&[], &[], vec![]);
        let b = movie(&[], &[], vec![]);
        assert_eq!(genre_overlap(&a, &b), 0.0);
        assert_eq!(cast_overlap(&a, &b), 0.0);
        assert_eq!(similarity(&a, &b), 0.0);
        assert!(!similarity(&a, &a).is_nan());
    }

    #[test]
    fn test_one_sided_empty_list() {
        let a = movie(&["Drama"], &[], vec![]);
        let b = movie(&[], &[], vec![]);
        assert_eq!(genre_overlap(&a, &b), 0.0);
    }

    #[test]
    fn test_rating_delta_treats_unrated_as_zero() {
        let rated = movie(&[], &[], vec![6.0, 8.0]);
        let unrated = movie(&[], &[], vec![]);
        assert_close(rating_delta(&rated, &unrated), 7.0);
        assert_close(rating_delta(&unrated, &rated), 7.0);
    }

    #[test]
    fn test_weighted_composite() {
        let a = movie(&["Drama", "Crime"], &["Sam Taylor", "Ana Ruiz"], vec![8.0]);
        let b = movie(&["Drama"], &["Sam Taylor"], vec![6.0]);
        // 0.5 * 0.5 + 2.0 * 0.3 + 0.5 * 0.2
        assert_close(similarity(&a, &b), 0.95);
    }

    #[test]
    fn test_rating_gap_raises_score() {
        // The rating term is a distance with a positive weight: a movie with
        // identical genres and cast but very different ratings outscores the
        // reference compared with itself.
        let reference = movie(&["Drama"], &["Sam Taylor"], vec![9.0]);
        let far_rated = movie(&["Drama"], &["Sam Taylor"], vec![1.0]);

        let self_score = similarity(&reference, &reference);
        let far_score = similarity(&reference, &far_rated);
        assert_close(self_score, 0.7);
        assert_close(far_score, 3.1);
        assert!(far_score > self_score);
    }
}
