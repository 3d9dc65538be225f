//! Parser for the JSON movie catalog.
//!
//! The catalog file is a single JSON array of movie objects:
//!
//! ```text
//! [
//!   {
//!     "id": "3f1c...",
//!     "title": "The Silent Shore",
//!     "year": "2019",
//!     "genres": ["Drama", "Mystery"],
//!     "ratings": [8, 9, 7],
//!     "viewerCount": 1200,
//!     "actors": ["Sam Taylor", "Ana Ruiz"],
//!     "duration": "PT2H5M",
//!     "releaseDate": "2019-05-01T00:00:00.000Z",
//!     ...
//!   }
//! ]
//! ```
//!
//! Besides reading and writing that file, this module holds the serde helpers
//! used by [`MovieRecord`]: null-tolerant sequences and a lenient release-date
//! format.

use crate::error::{DataLoadError, Result};
use crate::types::MovieRecord;
use chrono::Datelike;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse a catalog from JSON text
pub fn parse_catalog(json: &str) -> Result<Vec<MovieRecord>> {
    let records: Vec<MovieRecord> = serde_json::from_str(json)?;
    validate(&records)?;
    Ok(records)
}

/// Read and parse the catalog file at `path`
///
/// A missing file is reported as [`DataLoadError::FileNotFound`] rather than
/// being treated as an empty catalog.
pub fn read_catalog(path: &Path) -> Result<Vec<MovieRecord>> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let records = parse_catalog(&content)?;

    let mismatched = check_year_consistency(&records);
    debug!(
        "Parsed {} records from {} ({} with divergent year)",
        records.len(),
        path.display(),
        mismatched
    );
    Ok(records)
}

/// Write the whole catalog back to `path` as pretty-printed JSON
///
/// The array is written to a sibling temp file first and then renamed over
/// the target, so readers never observe a half-written catalog.
pub fn write_catalog(path: &Path, records: &[MovieRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Reject records that break the catalog's basic invariants
fn validate(records: &[MovieRecord]) -> Result<()> {
    for (idx, record) in records.iter().enumerate() {
        if record.title.trim().is_empty() {
            return Err(DataLoadError::ValidationError(format!(
                "record {} (id {}) has an empty title",
                idx, record.id
            )));
        }
        if let Some(bad) = record.ratings.iter().find(|r| !r.is_finite()) {
            return Err(DataLoadError::InvalidValue {
                field: "ratings".to_string(),
                value: bad.to_string(),
            });
        }
    }
    Ok(())
}

/// Log every record whose `year` string disagrees with its `releaseDate`
///
/// Returns the number of divergent records. Ranking by year always uses
/// `releaseDate`, so this is a data-quality signal, not an error.
pub fn check_year_consistency(records: &[MovieRecord]) -> usize {
    let mut mismatched = 0;
    for record in records {
        let release_year = record.release_date.year();
        let consistent = match record.year.trim().parse::<i32>() {
            Ok(year) => year == release_year,
            Err(_) => record.year.trim().is_empty(),
        };
        if !consistent {
            mismatched += 1;
            warn!(
                "Movie '{}' has year '{}' but release date {}",
                record.title, record.year, record.release_date
            );
        }
    }
    mismatched
}

/// Deserialize a sequence, mapping JSON `null` to an empty `Vec`
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// serde helpers for `releaseDate`
///
/// Accepts plain dates (`2019-05-01`), RFC 3339 timestamps
/// (`2019-05-01T00:00:00.000Z`) and naive timestamps
/// (`2019-05-01T00:00:00`). Always writes `YYYY-MM-DD`.
pub(crate) mod release_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid releaseDate: {raw}"))
        })
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            return Some(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|timestamp| timestamp.date())
    }
}
