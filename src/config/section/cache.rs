//! `[cache]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [cache]
//! dir = ".critpath/cache"   # Transient cache directory
//! ttl = 86400               # Lifetime of cached lists, in seconds
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{CACHE_DIR, DEFAULT_TTL};
use crate::config::{ConfigDiagnostics, FieldPath};

/// Transient cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub dir: PathBuf,

    /// Seconds.
    pub ttl: u64,
}

pub struct CacheFields {
    pub dir: FieldPath,
    pub ttl: FieldPath,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: CACHE_DIR.into(),
            ttl: DEFAULT_TTL.as_secs(),
        }
    }
}

impl CacheConfig {
    pub const FIELDS: CacheFields = CacheFields {
        dir: FieldPath::new("cache.dir"),
        ttl: FieldPath::new("cache.ttl"),
    };

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }

    pub fn normalize(&mut self, root: &Path) {
        self.dir = crate::config::util::expand_path(&self.dir, root);
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.ttl == 0 {
            diag.error_with_hint(
                Self::FIELDS.ttl,
                "must be greater than 0",
                "use 86400 for one day",
            );
        }
        if self.dir.is_file() {
            diag.error(
                Self::FIELDS.dir,
                format!("`{}` is a file", self.dir.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_cache_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.cache.dir, Path::new(CACHE_DIR));
        assert_eq!(config.cache.ttl(), DEFAULT_TTL);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = test_parse_config("[cache]\nttl = 0");
        let mut diag = ConfigDiagnostics::new();
        config.cache.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, CacheConfig::FIELDS.ttl);
    }
}
