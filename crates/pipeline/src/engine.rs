//! The QueryEngine routes a query to its strategy and paginates the result.
//!
//! ## Usage
//! ```ignore
//! let engine = QueryEngine::new();
//! let query = QuerySpec::new()
//!     .with_category(Category::Popularity)
//!     .with_order(Order::Desc)
//!     .with_take(20);
//!
//! let snapshot = catalog.snapshot()?;
//! let movies = engine.run(&snapshot, &query)?;
//! ```

use crate::error::Result;
use crate::paginate::Page;
use crate::query::QuerySpec;
use crate::views::MovieView;
use data_loader::{Catalog, MovieRecord};

/// Stateless dispatcher over the strategy set.
///
/// The engine holds no catalog and no cache; every call receives the
/// snapshot it should work on.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run `query` against `snapshot` and return the requested page.
    ///
    /// ## Algorithm
    /// 1. Validate the query (before touching any record)
    /// 2. Select the strategy for `query.categorize_by`
    /// 3. Let the strategy filter/score/sort the whole snapshot
    /// 4. Cut out page `query.page` of size `query.take`
    /// 5. Project only that page into response views
    pub fn run(&self, snapshot: &[MovieRecord], query: &QuerySpec) -> Result<Vec<MovieView>> {
        Ok(self.run_page(snapshot, query)?.items)
    }

    /// Same as [`run`](Self::run), keeping the paging metadata
    pub fn run_page(&self, snapshot: &[MovieRecord], query: &QuerySpec) -> Result<Page<MovieView>> {
        query.validate()?;

        let strategy = query.categorize_by.strategy();
        tracing::debug!(
            "Applying strategy: {} (input count: {})",
            strategy.name(),
            snapshot.len()
        );
        let ranked = strategy.rank(snapshot, query)?;
        tracing::debug!(
            "Strategy applied: {} (output count: {})",
            strategy.name(),
            ranked.len()
        );

        let page = Page::new(ranked, query.page, query.take);
        Ok(page.map(|entry| strategy.project(entry)))
    }

    /// Fetch a snapshot from `catalog` and run `query` on it
    ///
    /// A failing catalog is reported as [`QueryError::Io`](crate::QueryError::Io)
    /// without retrying.
    pub fn execute<C: Catalog + ?Sized>(&self, catalog: &C, query: &QuerySpec) -> Result<Vec<MovieView>> {
        let snapshot = catalog.snapshot()?;
        self.run(&snapshot, query)
    }

    /// First record whose title equals `title` exactly
    pub fn find_by_title(&self, snapshot: &[MovieRecord], title: &str) -> Option<MovieRecord> {
        snapshot.iter().find(|movie| movie.title == title).cloned()
    }
}
