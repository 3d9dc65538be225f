//! Strategy ranking movies by computed popularity.

use crate::error::Result;
use crate::query::QuerySpec;
use crate::scoring::popularity;
use crate::sorting::sort_by_score;
use crate::traits::{Ranked, Strategy};
use crate::views::{MovieView, PopularityView};
use data_loader::MovieRecord;
use rayon::prelude::*;

/// Ranks every record by [`popularity`], attaching the score to the view.
///
/// ## Performance Note
/// Scores are computed with Rayon; `collect` keeps catalog order so the
/// stable sort afterwards still breaks ties by catalog position.
pub struct PopularityStrategy;

impl Strategy for PopularityStrategy {
    fn name(&self) -> &'static str {
        "PopularityStrategy"
    }

    fn rank<'a>(&self, snapshot: &'a [MovieRecord], query: &QuerySpec) -> Result<Vec<Ranked<'a>>> {
        let mut ranked: Vec<Ranked<'a>> = snapshot
            .par_iter()
            .map(|movie| Ranked::scored(movie, popularity(movie)))
            .collect();
        sort_by_score(&mut ranked, query.order);
        Ok(ranked)
    }

    fn project(&self, ranked: Ranked<'_>) -> MovieView {
        let score = ranked.score.unwrap_or_else(|| popularity(ranked.movie));
        MovieView::Popularity(PopularityView::new(ranked.movie, score))
    }
}
