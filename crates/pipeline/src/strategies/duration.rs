//! Strategy ordering movies by running time.

use crate::duration::parse_duration_minutes;
use crate::error::Result;
use crate::query::QuerySpec;
use crate::sorting::sort_by_key;
use crate::traits::{Ranked, Strategy};
use crate::views::{DurationView, MovieView};
use data_loader::MovieRecord;
use tracing::warn;

/// Sorts every record by its duration in minutes.
///
/// A single malformed duration fails the whole query with a format error;
/// the catalog is not silently reordered around bad data.
pub struct DurationStrategy;

impl Strategy for DurationStrategy {
    fn name(&self) -> &'static str {
        "DurationStrategy"
    }

    fn rank<'a>(&self, snapshot: &'a [MovieRecord], query: &QuerySpec) -> Result<Vec<Ranked<'a>>> {
        let keyed = snapshot
            .iter()
            .map(|movie| {
                parse_duration_minutes(&movie.duration)
                    .map(|minutes| (minutes, movie))
                    .inspect_err(|e| warn!("Movie '{}' (id {}): {}", movie.title, movie.id, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(sort_by_key(keyed, query.order))
    }

    fn project(&self, ranked: Ranked<'_>) -> MovieView {
        MovieView::Duration(DurationView::from(ranked.movie))
    }
}
