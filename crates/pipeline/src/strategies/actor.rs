//! Strategy to keep only movies featuring a given actor.

use crate::error::{QueryError, Result};
use crate::query::QuerySpec;
use crate::traits::{Ranked, Strategy};
use crate::views::{ActorView, MovieView};
use data_loader::MovieRecord;

/// Keeps records whose cast lists `query.actor`.
///
/// ## Algorithm
/// Exact, case-sensitive match against each entry of `actors`. Catalog order
/// is kept; `order` has no effect.
pub struct ActorStrategy;

impl Strategy for ActorStrategy {
    fn name(&self) -> &'static str {
        "ActorStrategy"
    }

    fn rank<'a>(&self, snapshot: &'a [MovieRecord], query: &QuerySpec) -> Result<Vec<Ranked<'a>>> {
        let actor = query
            .actor
            .as_deref()
            .ok_or_else(|| QueryError::Validation("categorizeBy=actor requires an actor".to_string()))?;

        let filtered: Vec<Ranked<'a>> = snapshot
            .iter()
            .filter(|movie| movie.actors.iter().any(|name| name == actor))
            .map(Ranked::unscored)
            .collect();
        Ok(filtered)
    }

    fn project(&self, ranked: Ranked<'_>) -> MovieView {
        MovieView::Actor(ActorView::from(ranked.movie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_snapshot() -> Vec<MovieRecord> {
        let date = NaiveDate::from_ymd_opt(2012, 4, 1).unwrap();
        vec![
            MovieRecord::new("1", "Harbor", date).with_actors(["Sam Taylor", "Ana Ruiz"]),
            MovieRecord::new("2", "Dust", date).with_actors(["sam taylor"]),
            MovieRecord::new("3", "Orbit", date).with_actors(["Lee Park", "Sam Taylor"]),
            MovieRecord::new("4", "Quiet", date),
        ]
    }

    #[test]
    fn test_actor_filter_is_exact() {
        let snapshot = create_test_snapshot();
        let query = QuerySpec::new().with_actor("Sam Taylor");

        let ranked = ActorStrategy.rank(&snapshot, &query).unwrap();
        let ids: Vec<&str> = ranked.iter().map(|r| r.movie.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_actor_filter_no_match() {
        let snapshot = create_test_snapshot();
        let query = QuerySpec::new().with_actor("Nobody");
        assert!(ActorStrategy.rank(&snapshot, &query).unwrap().is_empty());
    }

    #[test]
    fn test_missing_actor_is_validation_error() {
        let snapshot = create_test_snapshot();
        let err = ActorStrategy.rank(&snapshot, &QuerySpec::new()).unwrap_err();
        assert!(matches!(err, QueryError::Validation(_)));
    }
}
