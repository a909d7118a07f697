//! Transient cache: expiring key-value entries that outlive one request.
//!
//! Only the render-blocking stylesheet list is cached here. Entries are
//! purged by key prefix whenever plugins, themes or settings change.

mod file;
mod memory;

use std::io;
use std::time::{Duration, SystemTime};

pub use file::FileTransients;
pub use memory::MemoryTransients;

/// Default cache directory name (inside the project root).
pub const CACHE_DIR: &str = ".critpath/cache";

/// Default transient lifetime: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Key prefixes owned by this crate.
pub mod prefix {
    pub const DEFER_STYLES: &str = "defer_styles_";
    pub const DEFER_SCRIPTS: &str = "defer_scripts_";

    pub const ALL: [&str; 2] = [DEFER_SCRIPTS, DEFER_STYLES];
}

/// Expiring storage for string lists.
///
/// Reads and writes never fail from the caller's point of view: a broken
/// entry reads as absent, a failed write is dropped.
pub trait Transients {
    fn get(&self, key: &str) -> Option<Vec<String>>;

    /// Store `value`; `ttl = None` means no expiry.
    fn set(&self, key: &str, value: Vec<String>, ttl: Option<Duration>);

    /// Delete every entry whose key starts with `prefix`.
    fn delete_prefix(&self, prefix: &str) -> io::Result<usize>;
}

/// Purge every transient owned by this crate.
///
/// Returns the number of entries removed.
pub fn clear_transients(transients: &dyn Transients) -> io::Result<usize> {
    let mut removed = 0;
    for prefix in prefix::ALL {
        removed += transients.delete_prefix(prefix)?;
    }
    Ok(removed)
}

/// Seconds since the Unix epoch.
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Absolute expiry timestamp for a TTL.
fn expiry(ttl: Option<Duration>) -> Option<u64> {
    ttl.map(|ttl| now_secs().saturating_add(ttl.as_secs()))
}

fn is_expired(expires: Option<u64>) -> bool {
    expires.is_some_and(|at| at <= now_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_transients_only_touches_own_prefixes() {
        let t = MemoryTransients::new();
        t.set("defer_styles_1", vec!["a".into()], None);
        t.set("defer_scripts_1", vec!["b".into()], None);
        t.set("unrelated", vec!["c".into()], None);

        assert_eq!(clear_transients(&t).unwrap(), 2);
        assert!(t.get("defer_styles_1").is_none());
        assert!(t.get("defer_scripts_1").is_none());
        assert_eq!(t.get("unrelated"), Some(vec!["c".to_string()]));
    }

    #[test]
    fn test_expiry() {
        assert!(!is_expired(None));
        assert!(!is_expired(expiry(Some(DEFAULT_TTL))));
        assert!(is_expired(Some(0)));
    }
}
