//! File-backed cache for API responses.
//!
//! One JSON file per entry under the `cache` subdirectory of the output
//! directory, named `{kind}_{id}.json`. Entries have no TTL: a cached
//! response is reused until the cache is cleared manually.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory-backed key-value store for JSON payloads.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `dir`, creating the directory if needed.
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Get the cache directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, kind: &str, id: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.json", kind, id))
    }

    /// Load an entry, treating a missing, unreadable, or unparseable file
    /// as a miss.
    pub fn load<T: DeserializeOwned>(&self, kind: &str, id: &str) -> Option<T> {
        let path = self.entry_path(kind, id);
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cache entry");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse cache entry");
                None
            }
        }
    }

    /// Save an entry. Failures are logged and swallowed: a dead cache must
    /// not abort the run.
    pub fn save<T: Serialize>(&self, kind: &str, id: &str, value: &T) {
        let path = self.entry_path(kind, id);
        let content = match serde_json::to_string_pretty(value) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = std::fs::write(&path, content) {
            warn!(path = %path.display(), error = %e, "Failed to save cache entry");
        } else {
            debug!(path = %path.display(), "Cached");
        }
    }

    /// Delete all cache entries. Returns the number of files removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Cache key for an author-search request: lowercase, spaces to
/// underscores, dots stripped.
pub fn author_key(name: &str) -> String {
    name.replace(' ', "_").replace('.', "").to_lowercase()
}

/// Cache key for an author-papers request: author id plus the sorted
/// year window.
pub fn papers_key(author_id: &str, years: &[i32]) -> String {
    let mut sorted = years.to_vec();
    sorted.sort_unstable();
    let years_str = sorted
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}", author_id, years_str)
}
