//! Strategy ordering movies by release year.

use crate::error::Result;
use crate::query::QuerySpec;
use crate::sorting::{release_year, sort_by_key};
use crate::traits::{Ranked, Strategy};
use crate::views::{MovieView, YearView};
use data_loader::MovieRecord;

/// Sorts every record by the year of its release date.
///
/// Only the year is compared, so two movies from the same year keep their
/// catalog order even if their release dates differ.
pub struct YearStrategy;

impl Strategy for YearStrategy {
    fn name(&self) -> &'static str {
        "YearStrategy"
    }

    fn rank<'a>(&self, snapshot: &'a [MovieRecord], query: &QuerySpec) -> Result<Vec<Ranked<'a>>> {
        let keyed: Vec<(i32, &'a MovieRecord)> = snapshot
            .iter()
            .map(|movie| (release_year(movie), movie))
            .collect();
        Ok(sort_by_key(keyed, query.order))
    }

    fn project(&self, ranked: Ranked<'_>) -> MovieView {
        MovieView::Year(YearView::from(ranked.movie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Order;
    use chrono::NaiveDate;

    fn movie(id: &str, y: i32, m: u32, year_text: &str) -> MovieRecord {
        MovieRecord::new(id, id, NaiveDate::from_ymd_opt(y, m, 1).unwrap()).with_year(year_text)
    }

    #[test]
    fn test_sorted_by_release_date_year() {
        let snapshot = vec![
            // The year string says 1990 but the release date wins
            movie("late", 2020, 1, "1990"),
            movie("early", 1980, 6, "1980"),
            movie("mid-dec", 2000, 12, "2000"),
            movie("mid-jan", 2000, 1, "2000"),
        ];

        let asc = YearStrategy.rank(&snapshot, &QuerySpec::new()).unwrap();
        let ids: Vec<&str> = asc.iter().map(|r| r.movie.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "mid-dec", "mid-jan", "late"]);

        let desc = YearStrategy
            .rank(&snapshot, &QuerySpec::new().with_order(Order::Desc))
            .unwrap();
        let ids: Vec<&str> = desc.iter().map(|r| r.movie.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "mid-dec", "mid-jan", "early"]);
    }

    #[test]
    fn test_projection_reports_release_year() {
        let snapshot = vec![movie("late", 2020, 1, "1990")];
        let ranked = YearStrategy.rank(&snapshot, &QuerySpec::new()).unwrap();
        match YearStrategy.project(ranked[0]) {
            MovieView::Year(v) => assert_eq!(v.year, 2020),
            other => panic!("unexpected view {other:?}"),
        }
    }
}
