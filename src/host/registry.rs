//! Registered assets and the render queue.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Metadata key holding a script's loading strategy.
pub const STRATEGY: &str = "strategy";

fn default_media() -> String {
    "all".to_string()
}

/// A script or stylesheet known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAsset {
    pub handle: String,

    /// Source URL. Empty for inline-only or alias handles.
    #[serde(default)]
    pub src: String,

    /// Version appended as `?ver=`.
    #[serde(default)]
    pub ver: Option<String>,

    /// Media attribute (stylesheets only).
    #[serde(default = "default_media")]
    pub media: String,

    /// Handles that must be output first.
    #[serde(default)]
    pub deps: Vec<String>,

    /// Free-form metadata (`strategy`, ...).
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl RegisteredAsset {
    /// The version if it is set and non-empty.
    pub fn version(&self) -> Option<&str> {
        self.ver.as_deref().filter(|v| !v.is_empty())
    }

    pub fn strategy(&self) -> Option<&str> {
        self.extra.get(STRATEGY).map(String::as_str)
    }
}

#[cfg(test)]
impl RegisteredAsset {
    pub fn new(handle: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            src: src.into(),
            ver: None,
            media: default_media(),
            deps: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_ver(mut self, ver: impl Into<String>) -> Self {
        self.ver = Some(ver.into());
        self
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    pub fn with_deps(mut self, deps: &[&str]) -> Self {
        self.deps = deps.iter().map(|d| d.to_string()).collect();
        self
    }
}

/// One kind of asset (styles or scripts): registrations plus the queue.
///
/// Registration order is kept so output and iteration are deterministic.
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    registered: Vec<RegisteredAsset>,
    queue: Vec<String>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset. An existing registration under the same handle
    /// wins and `false` is returned.
    pub fn register(&mut self, asset: RegisteredAsset) -> bool {
        if self.get(&asset.handle).is_some() {
            return false;
        }
        self.registered.push(asset);
        true
    }

    /// Remove a registration. Queued references are left in place but can
    /// no longer be output.
    pub fn deregister(&mut self, handle: &str) {
        self.registered.retain(|a| a.handle != handle);
    }

    pub fn enqueue(&mut self, handle: &str) {
        if !self.is_queued(handle) {
            self.queue.push(handle.to_string());
        }
    }

    pub fn dequeue(&mut self, handle: &str) {
        self.queue.retain(|h| h != handle);
    }

    pub fn is_queued(&self, handle: &str) -> bool {
        self.queue.iter().any(|h| h == handle)
    }

    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    pub fn get(&self, handle: &str) -> Option<&RegisteredAsset> {
        self.registered.iter().find(|a| a.handle == handle)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAsset> {
        self.registered.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RegisteredAsset> {
        self.registered.iter_mut()
    }

    /// Assets to output, in order: each queued handle preceded by its
    /// registered dependencies. Unregistered handles are skipped.
    pub fn resolve(&self) -> Vec<&RegisteredAsset> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for handle in &self.queue {
            self.visit(handle, &mut seen, &mut out);
        }
        out
    }

    fn visit<'a>(
        &'a self,
        handle: &str,
        seen: &mut FxHashSet<String>,
        out: &mut Vec<&'a RegisteredAsset>,
    ) {
        if !seen.insert(handle.to_string()) {
            return;
        }
        let Some(asset) = self.get(handle) else {
            return;
        };
        for dep in &asset.deps {
            self.visit(dep, seen, out);
        }
        out.push(asset);
    }
}

/// The host's asset registry for one request.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub styles: AssetTable,
    pub scripts: AssetTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(assets: Vec<&RegisteredAsset>) -> Vec<&str> {
        assets.into_iter().map(|a| a.handle.as_str()).collect()
    }

    #[test]
    fn test_register_keeps_first() {
        let mut table = AssetTable::new();
        assert!(table.register(RegisteredAsset::new("a", "/a.css")));
        assert!(!table.register(RegisteredAsset::new("a", "/other.css")));
        assert_eq!(table.get("a").unwrap().src, "/a.css");
    }

    #[test]
    fn test_resolve_orders_deps_first() {
        let mut table = AssetTable::new();
        table.register(RegisteredAsset::new("theme", "/t.css").with_deps(&["reset", "missing"]));
        table.register(RegisteredAsset::new("reset", "/r.css"));
        table.enqueue("theme");
        table.enqueue("reset");
        assert_eq!(handles(table.resolve()), ["reset", "theme"]);
    }

    #[test]
    fn test_deregistered_dependency_is_not_readded() {
        let mut table = AssetTable::new();
        table.register(RegisteredAsset::new("theme", "/t.css").with_deps(&["icons"]));
        table.register(RegisteredAsset::new("icons", "/i.css"));
        table.enqueue("theme");
        table.enqueue("icons");

        table.dequeue("icons");
        assert_eq!(handles(table.resolve()), ["icons", "theme"]);

        table.deregister("icons");
        assert_eq!(handles(table.resolve()), ["theme"]);
    }

    #[test]
    fn test_version_ignores_empty() {
        let asset = RegisteredAsset::new("a", "/a.css").with_ver("");
        assert_eq!(asset.version(), None);
        assert_eq!(asset.with_ver("1.2").version(), Some("1.2"));
    }
}
