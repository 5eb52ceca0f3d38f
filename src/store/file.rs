//! JSON-file-backed panchang store
//!
//! A single JSON document maps stringified cache keys to stored results.
//! The whole map is loaded at open and rewritten on each insert, through a
//! temporary file renamed into place so readers never see a torn write.
//! Fine for the archive sizes a panchang service accumulates (one entry
//! per date/location cell).

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::{PanchangaError, Result};

use super::{CacheKey, PanchangStore, StoredPanchang};

/// File-backed store usable across processes.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, StoredPanchang>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any existing archive. A missing
    /// file is an empty store; it is created on the first `put`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let file = File::open(&path).map_err(|e| cache_io("open", &path, e))?;
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                PanchangaError::CacheUnavailable(format!(
                    "archive {} is not readable JSON: {e}",
                    path.display()
                ))
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Number of archived entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the archive holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, entries: &HashMap<String, StoredPanchang>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| cache_io("create dir for", &self.path, e))?;
            }
        }

        // Write to a sibling temp file first so a crash mid-write cannot
        // corrupt the archive
        let temp_path = self.path.with_extension("tmp");
        let file = File::create(&temp_path).map_err(|e| cache_io("create", &temp_path, e))?;
        serde_json::to_writer(BufWriter::new(file), entries).map_err(|e| {
            PanchangaError::CacheUnavailable(format!(
                "could not serialize archive {}: {e}",
                self.path.display()
            ))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| cache_io("replace", &self.path, e))?;
        Ok(())
    }
}

fn cache_io(action: &str, path: &Path, err: std::io::Error) -> PanchangaError {
    PanchangaError::CacheUnavailable(format!("could not {action} {}: {err}", path.display()))
}

impl PanchangStore for JsonFileStore {
    fn get(&self, key: &CacheKey) -> Result<Option<StoredPanchang>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PanchangaError::CacheUnavailable("store lock poisoned".to_string()))?;
        Ok(entries.get(&key.to_string()).cloned())
    }

    fn put(&self, key: &CacheKey, value: StoredPanchang) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PanchangaError::CacheUnavailable("store lock poisoned".to_string()))?;
        let key = key.to_string();
        if entries.contains_key(&key) {
            return Ok(());
        }
        entries.insert(key, value);
        self.persist(&entries)
    }
}
