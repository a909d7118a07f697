//! In-process transients.

use std::io;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::{Transients, expiry, is_expired};

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<String>,
    expires: Option<u64>,
}

/// Transients held in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryTransients {
    entries: Mutex<FxHashMap<String, Entry>>,
}

impl MemoryTransients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

impl Transients for MemoryTransients {
    fn get(&self, key: &str) -> Option<Vec<String>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if is_expired(entry.expires) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    fn set(&self, key: &str, value: Vec<String>, ttl: Option<Duration>) {
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value,
                expires: expiry(ttl),
            },
        );
    }

    fn delete_prefix(&self, prefix: &str) -> io::Result<usize> {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }
}
