//! Asset manifest: the registry contents for a render, read from TOML.
//!
//! # Example
//!
//! ```toml
//! [[style]]
//! handle = "theme-style"
//! src = "/wp-content/themes/child/style.css"
//! ver = "2.1"
//!
//! [[style]]
//! handle = "print-style"
//! src = "/print.css"
//! media = "print"
//!
//! [[script]]
//! handle = "slider"
//! src = "https://cdn.example.com/slider.js"
//! deps = ["jquery"]
//! enqueue = false   # registered only
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::registry::{AssetTable, RegisteredAsset, Registry};

fn default_enqueue() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub asset: RegisteredAsset,

    /// Whether the asset is also enqueued (default: true).
    #[serde(default = "default_enqueue")]
    pub enqueue: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub style: Vec<ManifestEntry>,
    pub script: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read asset manifest `{}`", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("invalid asset manifest `{}`", path.display()))
    }

    /// Build a fresh registry from the manifest.
    pub fn to_registry(&self) -> Registry {
        Registry {
            styles: fill(&self.style),
            scripts: fill(&self.script),
        }
    }
}

fn fill(entries: &[ManifestEntry]) -> AssetTable {
    let mut table = AssetTable::new();
    for entry in entries {
        let handle = entry.asset.handle.clone();
        if table.register(entry.asset.clone()) && entry.enqueue {
            table.enqueue(&handle);
        }
    }
    table
}
