//! Catalog sources that hand out record snapshots.
//!
//! A [`Catalog`] owns the movie records and gives queries an immutable
//! [`Snapshot`] of them. Nothing is loaded lazily or cached globally: a
//! [`JsonCatalog`] reads its file when opened and only re-reads it when
//! [`JsonCatalog::refresh`] is called.

use crate::error::Result;
use crate::parser;
use crate::types::{MovieRecord, Snapshot};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::info;

/// Supplies the full record set to the query engine.
///
/// `Send + Sync` lets one catalog be shared by concurrent queries.
pub trait Catalog: Send + Sync {
    /// Returns the current snapshot of all records, in catalog order
    fn snapshot(&self) -> Result<Snapshot>;
}

// =============================================================================
// StaticCatalog
// =============================================================================

/// A fixed, in-memory catalog. Useful for fixtures and embedding.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    records: Snapshot,
}

impl StaticCatalog {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Arc::clone(&self.records))
    }
}

impl From<Vec<MovieRecord>> for StaticCatalog {
    fn from(records: Vec<MovieRecord>) -> Self {
        Self::new(records)
    }
}

// =============================================================================
// JsonCatalog
// =============================================================================

/// Catalog backed by a JSON file on disk.
///
/// The current snapshot sits behind an `RwLock`. Readers clone the `Arc`
/// and release the lock immediately; `refresh` and `append` build a new
/// snapshot and swap it in, so in-flight queries keep the one they started
/// with.
///
/// `refresh` and `append` are serialized by a writer lock held across the
/// file write, so concurrent appends never drop each other's records.
#[derive(Debug)]
pub struct JsonCatalog {
    path: PathBuf,
    current: RwLock<Snapshot>,
    writer: Mutex<()>,
}

impl JsonCatalog {
    /// Open the catalog at `path`, loading it eagerly
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = parser::read_catalog(&path)?;
        info!("Loaded {} movies from {}", records.len(), path.display());
        Ok(Self {
            path,
            current: RwLock::new(records.into()),
            writer: Mutex::new(()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records in the current snapshot
    pub fn len(&self) -> usize {
        self.current_snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-read the backing file and swap in the new snapshot
    ///
    /// On failure the previous snapshot stays in place.
    pub fn refresh(&self) -> Result<usize> {
        let _writer = self.lock_writer();
        let records = parser::read_catalog(&self.path)?;
        let count = records.len();
        self.replace(records.into());
        info!("Refreshed catalog from {} ({} movies)", self.path.display(), count);
        Ok(count)
    }

    /// Append a record, persist the whole catalog and swap in the new snapshot
    pub fn append(&self, record: MovieRecord) -> Result<Snapshot> {
        let _writer = self.lock_writer();
        let mut records: Vec<MovieRecord> = self.current_snapshot().to_vec();
        records.push(record);
        parser::write_catalog(&self.path, &records)?;

        let snapshot: Snapshot = records.into();
        self.replace(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current_snapshot(&self) -> Snapshot {
        // A poisoned lock still holds a complete snapshot; it is only ever
        // replaced wholesale.
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn replace(&self, snapshot: Snapshot) {
        match self.current.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

impl Catalog for JsonCatalog {
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.current_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn sample_record(id: &str, title: &str) -> MovieRecord {
        MovieRecord::new(id, title, NaiveDate::from_ymd_opt(2005, 6, 15).unwrap())
            .with_genres(["Drama"])
            .with_ratings(vec![7.0])
    }

    fn write_fixture(dir: &TempDir, records: &[MovieRecord]) -> PathBuf {
        let path = dir.path().join("movies.json");
        parser::write_catalog(&path, records).unwrap();
        path
    }

    #[test]
    fn test_static_catalog_shares_snapshot() {
        let catalog = StaticCatalog::new(vec![sample_record("1", "One")]);
        let first = catalog.snapshot().unwrap();
        let second = catalog.snapshot().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = JsonCatalog::open(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_open_and_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, &[sample_record("1", "One"), sample_record("2", "Two")]);

        let catalog = JsonCatalog::open(&path).unwrap();
        let snapshot = catalog.snapshot().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].title, "Two");
        assert_eq!(catalog.path(), path.as_path());
    }

    #[test]
    fn test_refresh_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, &[sample_record("1", "One")]);
        let catalog = JsonCatalog::open(&path).unwrap();
        let before = catalog.snapshot().unwrap();

        parser::write_catalog(&path, &[sample_record("1", "One"), sample_record("2", "Two")])
            .unwrap();
        assert_eq!(catalog.len(), 1, "no reload until refresh");

        assert_eq!(catalog.refresh().unwrap(), 2);
        assert_eq!(catalog.len(), 2);
        // Snapshots taken earlier are unaffected
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, &[sample_record("1", "One")]);
        let catalog = JsonCatalog::open(&path).unwrap();

        fs::write(&path, "not json").unwrap();
        assert!(catalog.refresh().is_err());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_append_persists() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, &[sample_record("1", "One")]);
        let catalog = JsonCatalog::open(&path).unwrap();

        let snapshot = catalog.append(sample_record("2", "Two")).unwrap();
        assert_eq!(snapshot.len(), 2);

        let reopened = JsonCatalog::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.snapshot().unwrap()[1].id, "2");
    }

    #[test]
    fn test_concurrent_appends_keep_every_record() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, &[sample_record("0", "Zero")]);
        let catalog = JsonCatalog::open(&path).unwrap();

        std::thread::scope(|scope| {
            for i in 1..=8 {
                let catalog = &catalog;
                scope.spawn(move || {
                    let id = i.to_string();
                    catalog.append(sample_record(&id, &format!("Movie {i}"))).unwrap();
                });
            }
        });
        assert_eq!(catalog.len(), 9);

        let reopened = JsonCatalog::open(&path).unwrap();
        let mut ids: Vec<String> = reopened.snapshot().unwrap().iter().map(|m| m.id.clone()).collect();
        ids.sort();
        assert_eq!(ids, (0..=8).map(|i| i.to_string()).collect::<Vec<_>>());
    }
}
