//! Default strategy: the catalog as is.

use crate::error::Result;
use crate::query::QuerySpec;
use crate::traits::{Ranked, Strategy};
use crate::views::MovieView;
use data_loader::MovieRecord;

/// Returns every record in catalog order, unfiltered and unsorted.
pub struct ListingStrategy;

impl Strategy for ListingStrategy {
    fn name(&self) -> &'static str {
        "ListingStrategy"
    }

    fn rank<'a>(&self, snapshot: &'a [MovieRecord], _query: &QuerySpec) -> Result<Vec<Ranked<'a>>> {
        Ok(snapshot.iter().map(Ranked::unscored).collect())
    }

    fn project(&self, ranked: Ranked<'_>) -> MovieView {
        MovieView::Full(ranked.movie.clone())
    }
}
