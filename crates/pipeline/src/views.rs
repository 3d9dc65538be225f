//! Response shapes, one per strategy.
//!
//! Derived values (popularity, similarity) only exist on the view of the
//! strategy that computed them. Views are fresh copies built for the
//! requested page, so catalog records are never modified.

use data_loader::{MovieId, MovieRecord};
use serde::Serialize;

/// A single query result, shaped by the strategy that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MovieView {
    /// Plain listing: the complete record
    Full(MovieRecord),
    Actor(ActorView),
    Popularity(PopularityView),
    Similarity(SimilarityView),
    Duration(DurationView),
    Year(YearView),
}

impl MovieView {
    pub fn id(&self) -> &str {
        match self {
            MovieView::Full(m) => &m.id,
            MovieView::Actor(v) => &v.id,
            MovieView::Popularity(v) => &v.id,
            MovieView::Similarity(v) => &v.id,
            MovieView::Duration(v) => &v.id,
            MovieView::Year(v) => &v.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            MovieView::Full(m) => &m.title,
            MovieView::Actor(v) => &v.title,
            MovieView::Popularity(v) => &v.title,
            MovieView::Similarity(v) => &v.title,
            MovieView::Duration(v) => &v.title,
            MovieView::Year(v) => &v.title,
        }
    }

    pub fn genres(&self) -> &[String] {
        match self {
            MovieView::Full(m) => &m.genres,
            MovieView::Actor(v) => &v.genres,
            MovieView::Popularity(v) => &v.genres,
            MovieView::Similarity(v) => &v.genres,
            MovieView::Duration(v) => &v.genres,
            MovieView::Year(v) => &v.genres,
        }
    }

    /// The derived score attached by popularity or similarity ranking
    pub fn score(&self) -> Option<f64> {
        match self {
            MovieView::Popularity(v) => Some(v.popularity),
            MovieView::Similarity(v) => Some(v.similarity),
            _ => None,
        }
    }
}

/// Result of an actor search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorView {
    pub id: MovieId,
    pub title: String,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
}

impl From<&MovieRecord> for ActorView {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            actors: movie.actors.clone(),
            genres: movie.genres.clone(),
        }
    }
}

/// Result of popularity ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityView {
    pub id: MovieId,
    pub title: String,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
    pub popularity: f64,
}

impl PopularityView {
    pub fn new(movie: &MovieRecord, popularity: f64) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            actors: movie.actors.clone(),
            genres: movie.genres.clone(),
            popularity,
        }
    }
}

/// Result of similarity search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityView {
    pub id: MovieId,
    pub title: String,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
    pub similarity: f64,
}

impl SimilarityView {
    pub fn new(movie: &MovieRecord, similarity: f64) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            actors: movie.actors.clone(),
            genres: movie.genres.clone(),
            similarity,
        }
    }
}

/// Result of duration sorting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationView {
    pub id: MovieId,
    pub title: String,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
    pub duration: String,
}

impl From<&MovieRecord> for DurationView {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            actors: movie.actors.clone(),
            genres: movie.genres.clone(),
            duration: movie.duration.clone(),
        }
    }
}

/// Result of release-year sorting
///
/// `year` is taken from the release date, the same value the sort used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearView {
    pub id: MovieId,
    pub title: String,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
    pub year: i32,
}

impl From<&MovieRecord> for YearView {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            actors: movie.actors.clone(),
            genres: movie.genres.clone(),
            year: crate::sorting::release_year(movie),
        }
    }
}
