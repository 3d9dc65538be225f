//! Settings used to build a [`MovieService`](crate::MovieService).

use std::path::PathBuf;

use anyhow::{Result, ensure};
use pipeline::{DEFAULT_TAKE, MAX_TAKE};

/// Default location of the catalog file, relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "data/movies.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// JSON file holding the movie array
    pub catalog_path: PathBuf,
    /// Page size used by queries that don't set one
    pub default_take: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            default_take: DEFAULT_TAKE,
        }
    }
}

impl ServiceConfig {
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            ..Self::default()
        }
    }

    pub fn with_default_take(mut self, take: usize) -> Self {
        self.default_take = take;
        self
    }

    /// Check the page size against the engine limits
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_TAKE).contains(&self.default_take),
            "default page size must be between 1 and {}, got {}",
            MAX_TAKE,
            self.default_take
        );
        Ok(())
    }
}
