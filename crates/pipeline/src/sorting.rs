//! Stable ordering helpers and sort-key extraction.
//!
//! `slice::sort_by` is a stable sort, and [`Order::apply`] flips the
//! comparator instead of reversing the output. Records with equal keys
//! therefore keep their catalog order in both directions, which makes
//! repeated paginated calls deterministic.

use crate::query::Order;
use crate::traits::Ranked;
use chrono::Datelike;
use data_loader::MovieRecord;

/// Stable sort of ranked entries by their attached score
///
/// Unscored entries rank below every scored one.
pub fn sort_by_score(ranked: &mut [Ranked<'_>], order: Order) {
    ranked.sort_by(|a, b| order.apply(score_key(a).total_cmp(&score_key(b))));
}

fn score_key(entry: &Ranked<'_>) -> f64 {
    entry.score.unwrap_or(f64::NEG_INFINITY)
}

/// Stable sort of records by a precomputed integer key
///
/// Keys are computed once per record, not once per comparison.
pub fn sort_by_key<'a, K: Ord>(
    keyed: Vec<(K, &'a MovieRecord)>,
    order: Order,
) -> Vec<Ranked<'a>> {
    let mut keyed = keyed;
    keyed.sort_by(|(a, _), (b, _)| order.apply(a.cmp(b)));
    keyed
        .into_iter()
        .map(|(_, movie)| Ranked::unscored(movie))
        .collect()
}

/// Release year used for year ordering
///
/// Always taken from `release_date`; the free-form `year` string is never
/// consulted, so the two can disagree without changing the ranking.
pub fn release_year(movie: &MovieRecord) -> i32 {
    movie.release_date.year()
}
