//! Query and ranking engine for the movie catalog.
//!
//! This crate provides:
//! - `QuerySpec`: which strategy to run, with its parameters and page
//! - `Strategy` trait and one implementation per query category
//! - Scorers for popularity and pairwise similarity
//! - The duration codec and stable sorting helpers
//! - `QueryEngine`: validation, dispatch and pagination
//!
//! ## Architecture
//! Every query goes through the same stages:
//! 1. The category selects exactly one strategy (unknown → plain listing)
//! 2. The strategy filters/scores/sorts the whole catalog snapshot
//! 3. The result is cut down to the requested 0-based page
//! 4. Only the page is copied into per-strategy response views
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Category, Order, QueryEngine, QuerySpec};
//!
//! let query = QuerySpec::new()
//!     .with_category(Category::Similarity)
//!     .with_title("Night Watch")
//!     .with_threshold(0.5)
//!     .with_order(Order::Desc);
//!
//! let snapshot = catalog.snapshot()?;
//! for movie in QueryEngine::new().run(&snapshot, &query)? {
//!     println!("{} {:?}", movie.title(), movie.score());
//! }
//! ```

pub mod duration;
pub mod engine;
pub mod error;
pub mod paginate;
pub mod query;
pub mod scoring;
pub mod sorting;
pub mod strategies;
pub mod traits;
pub mod views;

// Re-export main types
pub use duration::parse_duration_minutes;
pub use engine::QueryEngine;
pub use error::{QueryError, Result};
pub use paginate::{Page, paginate};
pub use query::{Category, DEFAULT_TAKE, MAX_TAKE, Order, QuerySpec};
pub use traits::{Ranked, Strategy};
pub use views::{ActorView, DurationView, MovieView, PopularityView, SimilarityView, YearView};
