//! Server crate for the movie catalog query service.
//!
//! This crate wraps the synchronous query engine in an async service that
//! runs every query on the blocking pool, so callers on a tokio runtime can
//! issue many queries concurrently against the same catalog snapshot.

pub mod config;
pub mod service;

pub use config::ServiceConfig;
pub use service::MovieService;
