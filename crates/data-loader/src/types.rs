//! Core domain types for the movie catalog.
//!
//! This module defines the record every other crate works with.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (MovieId, Snapshot)
//! - serde attributes to map camelCase JSON onto snake_case fields
//! - `Arc<[T]>` as a cheap-to-clone, immutable shared slice

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::parser;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque unique identifier for a movie (a UUID string in the JSON catalog)
pub type MovieId = String;

/// Immutable view of the whole catalog for the duration of one query.
///
/// Rust concept: cloning an `Arc` only bumps a reference count, so many
/// concurrent queries can read the same records without copying them.
pub type Snapshot = Arc<[MovieRecord]>;

// =============================================================================
// Movie Record
// =============================================================================

/// One movie as stored in the catalog.
///
/// Sequence fields (`genres`, `ratings`, `actors`) are never null: a missing
/// key or an explicit JSON `null` both deserialize to an empty `Vec`.
///
/// Query-scoped values such as popularity or similarity are deliberately not
/// fields here; they only exist on the response views built per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    /// Release year as written in the source data (e.g. `"1999"`).
    ///
    /// This can disagree with `release_date`; ranking uses `release_date`.
    #[serde(default)]
    pub year: String,
    #[serde(default, deserialize_with = "parser::null_as_empty")]
    pub genres: Vec<String>,
    /// Individual scores, typically 0-10
    #[serde(default, deserialize_with = "parser::null_as_empty")]
    pub ratings: Vec<f64>,
    #[serde(default)]
    pub viewer_count: u64,
    #[serde(default)]
    pub storyline: String,
    #[serde(default, deserialize_with = "parser::null_as_empty")]
    pub actors: Vec<String>,
    /// Compact duration such as `PT2H30M`
    #[serde(default)]
    pub duration: String,
    #[serde(with = "parser::release_date")]
    pub release_date: NaiveDate,
    #[serde(default)]
    pub content_rating: String,
    #[serde(default)]
    pub poster_image: String,
}

impl MovieRecord {
    /// Create a record with only the identifying fields set.
    ///
    /// The `year` string is derived from `release_date` so the two agree.
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>, release_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: release_date.format("%Y").to_string(),
            genres: Vec::new(),
            ratings: Vec::new(),
            viewer_count: 0,
            storyline: String::new(),
            actors: Vec::new(),
            duration: String::from("PT0M"),
            release_date,
            content_rating: String::new(),
            poster_image: String::new(),
        }
    }

    /// Set genres (builder pattern)
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Set actors (builder pattern)
    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = actors.into_iter().map(Into::into).collect();
        self
    }

    /// Set ratings (builder pattern)
    pub fn with_ratings(mut self, ratings: impl Into<Vec<f64>>) -> Self {
        self.ratings = ratings.into();
        self
    }

    /// Set viewer count (builder pattern)
    pub fn with_viewer_count(mut self, viewer_count: u64) -> Self {
        self.viewer_count = viewer_count;
        self
    }

    /// Set the compact duration string (builder pattern)
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Override the raw `year` string (builder pattern)
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }
}
