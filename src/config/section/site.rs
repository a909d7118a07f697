//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! home_url = "https://example.com"
//! theme_url = "https://example.com/wp-content/themes/child"
//! ```
//!
//! `theme_url` defaults to `home_url` when omitted.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::host::SiteUrls;

/// Site base URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root; `/path` URLs resolve against it.
    pub home_url: String,

    /// Active theme's asset directory; bare relative URLs resolve against it.
    pub theme_url: Option<String>,
}

pub struct SiteFields {
    pub home_url: FieldPath,
    pub theme_url: FieldPath,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_url: "http://localhost".into(),
            theme_url: None,
        }
    }
}

impl SiteConfig {
    pub const FIELDS: SiteFields = SiteFields {
        home_url: FieldPath::new("site.home_url"),
        theme_url: FieldPath::new("site.theme_url"),
    };

    /// Base URLs for a request.
    pub fn urls(&self) -> SiteUrls {
        let theme = self.theme_url.as_deref().unwrap_or(&self.home_url);
        SiteUrls::new(self.home_url.as_str(), theme)
    }

    /// Both URLs must be absolute http(s) URLs with a host.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_base_url(Self::FIELDS.home_url, &self.home_url, diag);
        if let Some(theme) = &self.theme_url {
            check_base_url(Self::FIELDS.theme_url, theme, diag);
        }
    }
}

fn check_base_url(field: FieldPath, value: &str, diag: &mut ConfigDiagnostics) {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
        Ok(_) => diag.error(field, format!("`{value}` must be an http(s) URL with a host")),
        Err(e) => diag.error_with_hint(
            field,
            format!("invalid URL `{value}`: {e}"),
            "use a full URL such as https://example.com",
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_site_urls() {
        let config = test_parse_config(
            "[site]\nhome_url = \"https://x.com/blog\"\ntheme_url = \"https://x.com/blog/theme\"",
        );
        let urls = config.site.urls();
        assert_eq!(urls.home, "https://x.com/blog");
        assert_eq!(urls.theme, "https://x.com/blog/theme");
    }

    #[test]
    fn test_theme_defaults_to_home() {
        let config = test_parse_config("[site]\nhome_url = \"https://x.com\"");
        assert_eq!(config.site.urls().theme, "https://x.com");
    }

    #[test]
    fn test_validate_rejects_relative_and_non_http() {
        let mut diag = crate::config::ConfigDiagnostics::new();
        test_parse_config("[site]\nhome_url = \"/blog\"").site.validate(&mut diag);
        test_parse_config("[site]\nhome_url = \"ftp://x.com\"").site.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
        assert_eq!(diag.errors()[0].field.as_str(), "site.home_url");

        let mut diag = crate::config::ConfigDiagnostics::new();
        test_parse_config("").site.validate(&mut diag);
        assert!(diag.errors().is_empty());
    }
}
