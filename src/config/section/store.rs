//! `[store]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [store]
//! path = "~/.local/share/critpath/options.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Option store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding every option record. Relative paths resolve against
    /// the project root; `~` is expanded.
    pub path: PathBuf,
}

pub struct StoreFields {
    pub path: FieldPath,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: ".critpath/options.json".into(),
        }
    }
}

impl StoreConfig {
    pub const FIELDS: StoreFields = StoreFields {
        path: FieldPath::new("store.path"),
    };

    /// Expand `~` and anchor relative paths at `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.path = crate::config::util::expand_path(&self.path, root);
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() {
            diag.error(Self::FIELDS.path, "must not be empty");
        } else if self.path.is_dir() {
            diag.error_with_hint(
                Self::FIELDS.path,
                format!("`{}` is a directory", self.path.display()),
                "point it at a JSON file, e.g. .critpath/options.json",
            );
        }
    }
}
