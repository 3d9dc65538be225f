//! Error types for query execution.

use data_loader::DataLoadError;
use thiserror::Error;

/// Everything that can stop a query from producing a page of results
#[derive(Error, Debug)]
pub enum QueryError {
    /// A catalog record holds a malformed duration string.
    ///
    /// This is a data-quality problem in the catalog, not a bad request.
    #[error("Invalid duration '{value}': {reason}")]
    Format { value: String, reason: String },

    /// No record matches the requested title
    #[error("No movie titled '{title}'")]
    NotFound { title: String },

    /// The catalog snapshot could not be obtained
    #[error("Catalog unavailable: {0}")]
    Io(#[from] DataLoadError),

    /// The query itself is malformed; raised before any strategy runs
    #[error("Invalid query: {0}")]
    Validation(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, QueryError>;
