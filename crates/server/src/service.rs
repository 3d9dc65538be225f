//! # Movie Service
//!
//! Async front for the query engine:
//! 1. Take the current catalog snapshot
//! 2. Run the requested strategy on it
//! 3. Return the requested page of response views
//!
//! Snapshot fetch and ranking are CPU/IO bound and run inside
//! `spawn_blocking`, so the async executor is never blocked. Each query
//! keeps the snapshot it started with even if the catalog is refreshed
//! meanwhile.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use data_loader::{Catalog, JsonCatalog, MovieRecord};
use pipeline::{MovieView, Page, QueryEngine, QuerySpec};

use crate::config::ServiceConfig;

/// Query service over a shared catalog
pub struct MovieService<C> {
    catalog: Arc<C>,
    engine: QueryEngine,
    default_take: usize,
}

impl<C> Clone for MovieService<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            engine: self.engine,
            default_take: self.default_take,
        }
    }
}

impl MovieService<JsonCatalog> {
    /// Open the catalog named by `config` and build a service on it
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let catalog = JsonCatalog::open(&config.catalog_path).with_context(|| {
            format!("Failed to open catalog {}", config.catalog_path.display())
        })?;
        Ok(Self::new(catalog).with_default_take(config.default_take))
    }

    /// Re-read the catalog file; returns the new record count
    ///
    /// Queries already running finish on the previous snapshot.
    pub async fn refresh(&self) -> Result<usize> {
        let catalog = Arc::clone(&self.catalog);
        tokio::task::spawn_blocking(move || catalog.refresh())
            .await
            .context("Refresh task panicked")?
            .context("Failed to refresh catalog")
    }

    /// Persist a new record and make it visible to later queries
    pub async fn add_movie(&self, record: MovieRecord) -> Result<usize> {
        let catalog = Arc::clone(&self.catalog);
        let title = record.title.clone();
        let snapshot = tokio::task::spawn_blocking(move || catalog.append(record))
            .await
            .context("Append task panicked")?
            .with_context(|| format!("Failed to add movie '{title}'"))?;
        info!("Added movie '{}' (catalog size {})", title, snapshot.len());
        Ok(snapshot.len())
    }
}

impl<C: Catalog + 'static> MovieService<C> {
    pub fn new(catalog: C) -> Self {
        Self::from_shared(Arc::new(catalog))
    }

    /// Build a service on a catalog that is also used elsewhere
    pub fn from_shared(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            engine: QueryEngine::new(),
            default_take: pipeline::DEFAULT_TAKE,
        }
    }

    pub fn with_default_take(mut self, take: usize) -> Self {
        self.default_take = take;
        self
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    /// A fresh query using this service's default page size
    pub fn query(&self) -> QuerySpec {
        QuerySpec::new().with_take(self.default_take)
    }

    /// Run `query` and return the page of views
    #[instrument(skip(self, query), fields(category = %query.categorize_by, page = query.page))]
    pub async fn find_all(&self, query: QuerySpec) -> Result<Vec<MovieView>> {
        Ok(self.find_page(query).await?.items)
    }

    /// Run `query`, keeping the paging metadata
    pub async fn find_page(&self, query: QuerySpec) -> Result<Page<MovieView>> {
        let start_time = Instant::now();
        let category = query.categorize_by;
        let catalog = Arc::clone(&self.catalog);
        let engine = self.engine;

        let page = tokio::task::spawn_blocking(move || -> pipeline::Result<Page<MovieView>> {
            let snapshot = catalog.snapshot()?;
            engine.run_page(&snapshot, &query)
        })
        .await
        .context("Query task panicked")?
        .with_context(|| format!("Failed to run {category} query"))?;

        info!(
            "{} query returned {} of {} movies in {:.2?}",
            category,
            page.items.len(),
            page.total,
            start_time.elapsed()
        );
        Ok(page)
    }

    /// First movie whose title equals `title` exactly
    #[instrument(skip(self))]
    pub async fn find_one(&self, title: &str) -> Result<Option<MovieRecord>> {
        let start_time = Instant::now();
        let catalog = Arc::clone(&self.catalog);
        let engine = self.engine;
        let wanted = title.to_string();

        let found = tokio::task::spawn_blocking(move || {
            catalog
                .snapshot()
                .map(|snapshot| engine.find_by_title(&snapshot, &wanted))
        })
        .await
        .context("Lookup task panicked")?
        .context("Failed to read catalog snapshot")?;

        info!(
            "Lookup for '{}' {} in {:.2?}",
            title,
            if found.is_some() { "hit" } else { "missed" },
            start_time.elapsed()
        );
        Ok(found)
    }
}
