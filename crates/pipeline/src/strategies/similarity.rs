//! Strategy finding movies similar to a reference title.

use crate::error::{QueryError, Result};
use crate::query::QuerySpec;
use crate::scoring::similarity;
use crate::sorting::sort_by_score;
use crate::traits::{Ranked, Strategy};
use crate::views::{MovieView, SimilarityView};
use data_loader::MovieRecord;
use rayon::prelude::*;
use tracing::debug;

/// Scores every record against the movie titled `query.title`.
///
/// ## Algorithm
/// 1. Find the reference: first record whose title equals `query.title`
///    (fails with `NotFound` otherwise)
/// 2. Score every record, the reference included, with [`similarity`]
/// 3. Keep scores `>= query.threshold()`
/// 4. Stable sort by score in `query.order`
pub struct SimilarityStrategy;

impl Strategy for SimilarityStrategy {
    fn name(&self) -> &'static str {
        "SimilarityStrategy"
    }

    fn rank<'a>(&self, snapshot: &'a [MovieRecord], query: &QuerySpec) -> Result<Vec<Ranked<'a>>> {
        let title = query.title.as_deref().ok_or_else(|| {
            QueryError::Validation("categorizeBy=similarity requires a title".to_string())
        })?;
        let reference = snapshot
            .iter()
            .find(|movie| movie.title == title)
            .ok_or_else(|| QueryError::NotFound {
                title: title.to_string(),
            })?;

        let threshold = query.threshold();
        let mut ranked: Vec<Ranked<'a>> = snapshot
            .par_iter()
            .filter_map(|candidate| {
                let score = similarity(reference, candidate);
                (score >= threshold).then(|| Ranked::scored(candidate, score))
            })
            .collect();
        debug!(
            "{} of {} movies reach similarity {} to '{}'",
            ranked.len(),
            snapshot.len(),
            threshold,
            title
        );

        sort_by_score(&mut ranked, query.order);
        Ok(ranked)
    }

    fn project(&self, ranked: Ranked<'_>) -> MovieView {
        MovieView::Similarity(SimilarityView::new(
            ranked.movie,
            ranked.score.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Order;
    use chrono::NaiveDate;

    fn create_test_snapshot() -> Vec<MovieRecord> {
        let date = NaiveDate::from_ymd_opt(2008, 7, 18).unwrap();
        vec![
            MovieRecord::new("ref", "Night Watch", date)
                .with_genres(["Action", "Crime"])
                .with_actors(["Sam Taylor", "Ana Ruiz"])
                .with_ratings(vec![8.0]),
            // Same genres, one shared actor, same rating
            MovieRecord::new("close", "Day Watch", date)
                .with_genres(["Action", "Crime"])
                .with_actors(["Sam Taylor"])
                .with_ratings(vec![8.0]),
            // Nothing shared, same rating
            MovieRecord::new("far", "Garden Party", date)
                .with_genres(["Comedy"])
                .with_actors(["Lee Park"])
                .with_ratings(vec![8.0]),
        ]
    }

    fn ids<'a>(ranked: &'a [Ranked<'a>]) -> Vec<&'a str> {
        ranked.iter().map(|r| r.movie.id.as_str()).collect()
    }

    #[test]
    fn test_reference_included_and_sorted() {
        let snapshot = create_test_snapshot();
        let query = QuerySpec::new()
            .with_title("Night Watch")
            .with_order(Order::Desc);

        let ranked = SimilarityStrategy.rank(&snapshot, &query).unwrap();
        // ref: 0.5 + 0.2 = 0.7, close: 0.5 + 0.1 = 0.6, far: 0.0
        assert_eq!(ids(&ranked), vec!["ref", "close", "far"]);
        assert!((ranked[0].score.unwrap() - 0.7).abs() < 1e-9);
        assert!((ranked[1].score.unwrap() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_is_inclusive_lower_bound() {
        let snapshot = create_test_snapshot();
        let cutoff = similarity(&snapshot[0], &snapshot[1]);
        let query = QuerySpec::new()
            .with_title("Night Watch")
            .with_threshold(cutoff)
            .with_order(Order::Desc);

        let ranked = SimilarityStrategy.rank(&snapshot, &query).unwrap();
        assert_eq!(ids(&ranked), vec!["ref", "close"]);
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let snapshot = create_test_snapshot();
        let query = QuerySpec::new().with_title("Missing Movie");

        let err = SimilarityStrategy.rank(&snapshot, &query).unwrap_err();
        assert!(matches!(err, QueryError::NotFound { ref title } if title == "Missing Movie"));
    }

    #[test]
    fn test_projection_carries_similarity() {
        let snapshot = create_test_snapshot();
        let query = QuerySpec::new().with_title("Night Watch");
        let ranked = SimilarityStrategy.rank(&snapshot, &query).unwrap();

        let view = SimilarityStrategy.project(ranked[0]);
        assert_eq!(view.id(), "far");
        assert_eq!(view.score(), Some(0.0));
    }
}
