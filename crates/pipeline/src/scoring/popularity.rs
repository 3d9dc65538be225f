//! Popularity score for a single movie.
//!
//! ## Algorithm
//! ```text
//! popularity = avg_rating * 0.5 + rating_count * 0.3 + viewer_count * 0.2
//! ```
//! The value is unbounded: rating and viewer counts scale it freely, so
//! only comparisons between movies are meaningful.

use super::average_rating;
use data_loader::MovieRecord;

pub const AVERAGE_RATING_WEIGHT: f64 = 0.5;
pub const RATING_COUNT_WEIGHT: f64 = 0.3;
pub const VIEWER_COUNT_WEIGHT: f64 = 0.2;

/// Compute the popularity of one movie
pub fn popularity(movie: &MovieRecord) -> f64 {
    average_rating(&movie.ratings) * AVERAGE_RATING_WEIGHT
        + movie.ratings.len() as f64 * RATING_COUNT_WEIGHT
        + movie.viewer_count as f64 * VIEWER_COUNT_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn movie(ratings: Vec<f64>, viewer_count: u64) -> MovieRecord {
        MovieRecord::new("m", "Movie", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
            .with_ratings(ratings)
            .with_viewer_count(viewer_count)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_weighted_formula() {
        // 8.5 * 0.5 + 2 * 0.3 + 100 * 0.2
        assert_close(popularity(&movie(vec![8.0, 9.0], 100)), 24.85);
        // 5 * 0.5 + 1 * 0.3 + 50 * 0.2
        assert_close(popularity(&movie(vec![5.0], 50)), 12.8);
    }

    #[test]
    fn test_no_ratings_no_viewers() {
        assert_eq!(popularity(&movie(vec![], 0)), 0.0);
        assert_close(popularity(&movie(vec![], 10)), 2.0);
    }

    #[test]
    fn test_monotonic_in_average_rating() {
        let low = popularity(&movie(vec![4.0, 4.0], 10));
        let high = popularity(&movie(vec![4.0, 9.0], 10));
        assert!(high >= low);
    }

    #[test]
    fn test_monotonic_in_rating_count() {
        // Same average, one more rating
        let fewer = popularity(&movie(vec![6.0, 6.0], 10));
        let more = popularity(&movie(vec![6.0, 6.0, 6.0], 10));
        assert!(more >= fewer);
    }

    #[test]
    fn test_monotonic_in_viewer_count() {
        let mut previous = f64::MIN;
        for viewers in [0, 1, 10, 1_000, 1_000_000] {
            let score = popularity(&movie(vec![7.0], viewers));
            assert!(score >= previous);
            previous = score;
        }
    }
}
