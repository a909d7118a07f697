//! `[request]` section configuration.
//!
//! Default request flags for `critpath render`. Command-line flags override
//! them.
//!
//! # Example
//!
//! ```toml
//! [request]
//! admin_bar = false   # Administrative toolbar visible
//! admin = false       # Administrative screen
//! strategy = true     # Host supports script loading strategies
//! ```

use serde::{Deserialize, Serialize};

use crate::host::RequestFlags;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub admin_bar: bool,
    pub admin: bool,
    pub strategy: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        let flags = RequestFlags::default();
        Self {
            admin_bar: flags.admin_bar,
            admin: flags.admin,
            strategy: flags.strategy,
        }
    }
}

impl RequestConfig {
    pub fn flags(&self) -> RequestFlags {
        RequestFlags {
            admin_bar: self.admin_bar,
            admin: self.admin,
            strategy: self.strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_request_partial_override() {
        let config = test_parse_config("[request]\nadmin_bar = true");
        let flags = config.request.flags();
        assert!(flags.admin_bar);
        assert!(!flags.admin);
        assert!(flags.strategy);
    }
}
