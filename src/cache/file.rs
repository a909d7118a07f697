//! Transients persisted as one JSON file per key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Transients, expiry, is_expired};
use crate::debug;

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    value: Vec<String>,
    expires: Option<u64>,
}

/// Transients stored under a cache directory (`<dir>/<key>.json`).
#[derive(Debug, Clone)]
pub struct FileTransients {
    dir: PathBuf,
}

impl FileTransients {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }

    fn write_entry(&self, key: &str, entry: &Entry) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(entry)?;
        fs::write(self.entry_path(key), json)
    }
}

impl Transients for FileTransients {
    fn get(&self, key: &str) -> Option<Vec<String>> {
        let path = self.entry_path(key);
        let content = fs::read_to_string(&path).ok()?;
        let entry: Entry = serde_json::from_str(&content).ok()?;
        if is_expired(entry.expires) {
            let _ = fs::remove_file(&path);
            return None;
        }
        Some(entry.value)
    }

    fn set(&self, key: &str, value: Vec<String>, ttl: Option<Duration>) {
        let entry = Entry {
            value,
            expires: expiry(ttl),
        };
        if let Err(e) = self.write_entry(key, &entry) {
            debug!("cache"; "failed to write transient `{}`: {}", key, e);
        }
    }

    fn delete_prefix(&self, prefix: &str) -> io::Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            let matches = path.extension().is_some_and(|ext| ext == "json")
                && path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|stem| stem.starts_with(prefix));
            if matches {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = TempDir::new().unwrap();
        let t = FileTransients::new(dir.path().join("cache"));
        assert!(t.get("defer_styles_1").is_none());

        t.set("defer_styles_1", vec!["theme".into()], Some(Duration::from_secs(60)));
        assert_eq!(t.get("defer_styles_1"), Some(vec!["theme".to_string()]));

        let other = FileTransients::new(dir.path().join("cache"));
        assert_eq!(other.get("defer_styles_1"), Some(vec!["theme".to_string()]));
    }

    #[test]
    fn test_delete_prefix() {
        let dir = TempDir::new().unwrap();
        let t = FileTransients::new(dir.path());
        t.set("defer_styles_a", vec![], None);
        t.set("defer_styles_b", vec![], None);
        t.set("keep", vec![], None);

        assert_eq!(t.delete_prefix("defer_styles_").unwrap(), 2);
        assert!(t.get("defer_styles_a").is_none());
        assert_eq!(t.get("keep"), Some(vec![]));
    }

    #[test]
    fn test_delete_prefix_missing_dir() {
        let dir = TempDir::new().unwrap();
        let t = FileTransients::new(dir.path().join("absent"));
        assert_eq!(t.delete_prefix("x").unwrap(), 0);
    }

    #[test]
    fn test_expired_file_is_removed() {
        let dir = TempDir::new().unwrap();
        let t = FileTransients::new(dir.path());
        t.set("old", vec!["x".into()], Some(Duration::ZERO));
        assert!(t.get("old").is_none());
        assert!(!dir.path().join("old.json").exists());
    }
}
