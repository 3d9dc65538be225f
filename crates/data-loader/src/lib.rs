//! # Data Loader Crate
//!
//! This crate owns the movie catalog: the record type, the JSON file format,
//! and the [`Catalog`] sources that hand snapshots to the query engine.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, Snapshot)
//! - **parser**: Read/write the JSON catalog file, serde helpers
//! - **catalog**: The `Catalog` trait plus `JsonCatalog` and `StaticCatalog`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, JsonCatalog};
//!
//! // Load the catalog once
//! let catalog = JsonCatalog::open("data/movies.json")?;
//!
//! // Every query works on its own immutable snapshot
//! let snapshot = catalog.snapshot()?;
//! println!("{} movies available", snapshot.len());
//!
//! // Pick up external edits explicitly
//! catalog.refresh()?;
//! ```

// Public modules
pub mod catalog;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, JsonCatalog, StaticCatalog};
pub use error::{DataLoadError, Result};
pub use parser::{parse_catalog, read_catalog, write_catalog};
pub use types::{MovieId, MovieRecord, Snapshot};
