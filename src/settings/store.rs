//! Option stores holding settings records.
//!
//! Both stores publish their contents through `arc-swap`: readers take a
//! lock-free snapshot, writers replace the whole map at once. A render
//! therefore always sees one complete record, possibly a slightly stale one.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::record::Record;

/// Option store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on option store `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("option store `{0}` is not valid JSON")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Generic key-value option storage.
pub trait OptionStore {
    /// Read the record stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError>;

    /// Replace the record stored under `key`.
    fn put(&self, key: &str, record: Record) -> Result<(), StoreError>;
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-process option store.
#[derive(Default)]
pub struct MemoryStore {
    options: ArcSwap<FxHashMap<String, Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.options.load().get(key).cloned())
    }

    fn put(&self, key: &str, record: Record) -> Result<(), StoreError> {
        self.options.rcu(|current| {
            let mut next = (**current).clone();
            next.insert(key.to_string(), record.clone());
            next
        });
        Ok(())
    }
}

// ============================================================================
// JsonFileStore
// ============================================================================

type Options = BTreeMap<String, Record>;

/// Option store backed by a single JSON file (`{ key: record, ... }`).
///
/// The file is read once and cached. Writes go through a temporary file and
/// a rename.
pub struct JsonFileStore {
    path: PathBuf,
    cache: ArcSwapOption<Options>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: ArcSwapOption::empty(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Arc<Options>, StoreError> {
        if let Some(options) = self.cache.load_full() {
            return Ok(options);
        }

        let options = match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Options::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StoreError::Json(self.path.clone(), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Options::new(),
            Err(e) => return Err(StoreError::Io(self.path.clone(), e)),
        };

        let options = Arc::new(options);
        self.cache.store(Some(Arc::clone(&options)));
        Ok(options)
    }

    fn write(&self, options: &Options) -> Result<(), StoreError> {
        let io_err = |e| StoreError::Io(self.path.clone(), e);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(options)
            .map_err(|e| StoreError::Json(self.path.clone(), e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl OptionStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn put(&self, key: &str, record: Record) -> Result<(), StoreError> {
        let mut next = (*self.load()?).clone();
        next.insert(key.to_string(), record);
        self.write(&next)?;
        self.cache.store(Some(Arc::new(next)));
        Ok(())
    }
}
