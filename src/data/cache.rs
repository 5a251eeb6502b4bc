//! Dataset Cache
//! Caller-owned cache of loaded datasets keyed by path and file fingerprint.

use crate::data::loader::{DataLoader, LoaderError};
use crate::data::record::Dataset;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Identity of a file's contents as seen through its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl Fingerprint {
    pub fn of(path: &Path) -> Result<Self, LoaderError> {
        let meta = std::fs::metadata(path).map_err(|source| LoaderError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

struct CacheEntry {
    fingerprint: Fingerprint,
    dataset: Arc<Dataset>,
}

/// Memoizes [`DataLoader::load`] per source file. A file is reloaded
/// whenever its fingerprint changes.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: usize,
    misses: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `path`, loading it only if it is not cached
    /// or the file changed since it was cached.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>) -> Result<Arc<Dataset>, LoaderError> {
        let path = path.as_ref();
        let key = Self::key(path);

        let fingerprint = match Fingerprint::of(path) {
            Ok(fp) => fp,
            Err(e) => {
                // A vanished file no longer canonicalizes to its cached key.
                self.entries.remove(&key);
                self.entries.retain(|cached, _| cached.exists());
                return Err(e);
            }
        };

        if let Some(entry) = self.entries.get(&key) {
            if entry.fingerprint == fingerprint {
                self.hits += 1;
                debug!(path = %path.display(), "Dataset cache hit");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        self.misses += 1;
        debug!(path = %path.display(), "Dataset cache miss");

        let dataset = match DataLoader::load(path) {
            Ok(ds) => Arc::new(ds),
            Err(e) => {
                self.entries.remove(&key);
                return Err(e);
            }
        };

        self.entries.insert(
            key,
            CacheEntry {
                fingerprint,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the cached dataset for `path`. Returns whether one was cached.
    pub fn invalidate(&mut self, path: impl AsRef<Path>) -> bool {
        self.entries.remove(&Self::key(path.as_ref())).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(&Self::key(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Canonical form of `path`, or the path as given if it cannot be resolved.
    fn key(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "show_id,type,title,country,date_added,listed_in\n";

    fn write_catalog(path: &Path, rows: &[&str]) {
        let mut body = HEADER.to_string();
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        fs::write(path, body).unwrap();
    }

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.csv");
        write_catalog(&path, &["s1,Movie,A,France,\"January 1, 2021\",Dramas"]);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.csv");
        write_catalog(&path, &["s1,Movie,A,France,\"January 1, 2021\",Dramas"]);

        let mut cache = DatasetCache::new();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);

        write_catalog(
            &path,
            &[
                "s1,Movie,A,France,\"January 1, 2021\",Dramas",
                "s2,TV Show,B,India,\"March 5, 2020\",Kids' TV",
            ],
        );
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn equivalent_paths_share_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.csv");
        write_catalog(&path, &["s1,Movie,A,France,\"January 1, 2021\",Dramas"]);
        let dotted = dir.path().join(".").join("titles.csv");

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&dotted).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
        assert!(cache.contains(&dotted));
    }

    #[test]
    fn explicit_invalidation_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.csv");
        write_catalog(&path, &["s1,Movie,A,France,\"January 1, 2021\",Dramas"]);

        let mut cache = DatasetCache::new();
        cache.get_or_load(&path).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.contains(&path));

        cache.get_or_load(&path).unwrap();
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn deleted_file_errors_and_drops_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.csv");
        write_catalog(&path, &["s1,Movie,A,France,\"January 1, 2021\",Dramas"]);

        let mut cache = DatasetCache::new();
        cache.get_or_load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let err = cache.get_or_load(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Unreadable { .. }));
        assert!(cache.is_empty());
    }
}
