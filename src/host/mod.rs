//! The host side of a render: registry, request state and site URLs.
//!
//! A [`Request`] is built once per page render and dropped afterwards. It
//! carries everything a hook callback may consult, including the one piece
//! of memoized state: the render-blocking stylesheet list.

mod manifest;
mod registry;
mod render;

use std::cell::OnceCell;
use std::time::Duration;

pub use manifest::Manifest;
pub use registry::{RegisteredAsset, Registry, STRATEGY};
pub use render::render_page;

use crate::cache::{DEFAULT_TTL, Transients, prefix};
use crate::settings::Settings;
use crate::utils::{hash, url};

/// Capabilities and context of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFlags {
    /// The administrative toolbar is shown on this page.
    pub admin_bar: bool,
    /// The request is for an administrative screen.
    pub admin: bool,
    /// The host supports per-script loading strategies.
    pub strategy: bool,
}

impl Default for RequestFlags {
    fn default() -> Self {
        Self {
            admin_bar: false,
            admin: false,
            strategy: true,
        }
    }
}

/// Base URLs used to resolve relative asset paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    /// Site root, e.g. `https://example.com`.
    pub home: String,
    /// Active theme's asset directory.
    pub theme: String,
}

impl SiteUrls {
    pub fn new(home: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            theme: theme.into(),
        }
    }

    /// `path` under the site root.
    pub fn home_url(&self, path: &str) -> String {
        url::join(&self.home, path)
    }

    /// `path` under the active theme directory.
    pub fn theme_url(&self, path: &str) -> String {
        url::join(&self.theme, path)
    }

    /// Resolve a user-supplied URL:
    /// - absolute / protocol-relative: unchanged
    /// - `/path`: against the site root
    /// - anything else: against the theme directory
    pub fn resolve(&self, raw: &str) -> String {
        if url::is_absolute(raw) {
            raw.to_string()
        } else if url::is_root_relative(raw) {
            self.home_url(raw)
        } else {
            self.theme_url(raw)
        }
    }

    /// Source URL of a registered asset with its version query.
    pub fn asset_src(&self, asset: &RegisteredAsset) -> String {
        let src = if url::is_root_relative(&asset.src) {
            self.home_url(&asset.src)
        } else {
            asset.src.clone()
        };
        match asset.version() {
            Some(ver) => url::add_query_arg(&src, "ver", ver),
            None => src,
        }
    }
}

/// Per-request context handed to every hook callback.
pub struct Request<'a> {
    pub settings: &'a Settings,
    pub registry: Registry,
    pub flags: RequestFlags,
    pub site: &'a SiteUrls,
    transients: &'a dyn Transients,
    ttl: Duration,
    render_blocking: OnceCell<Vec<String>>,
}

impl<'a> Request<'a> {
    pub fn new(
        settings: &'a Settings,
        registry: Registry,
        flags: RequestFlags,
        site: &'a SiteUrls,
        transients: &'a dyn Transients,
    ) -> Self {
        Self {
            settings,
            registry,
            flags,
            site,
            transients,
            ttl: DEFAULT_TTL,
            render_blocking: OnceCell::new(),
        }
    }

    /// Override the transient lifetime used for cached lists.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Whether this is a front-end (non-admin) request.
    pub fn is_frontend(&self) -> bool {
        !self.flags.admin
    }

    /// Stylesheet handles that stay render-blocking.
    ///
    /// Computed on first use and memoized for the rest of the request,
    /// read through the transient cache.
    pub fn render_blocking_handles(&self) -> &[String] {
        self.render_blocking.get_or_init(|| {
            let handles = self.settings.defer_styles.get().cloned().unwrap_or_default();
            let key = format!("{}{}", prefix::DEFER_STYLES, hash::fingerprint_list(&handles));
            match self.transients.get(&key) {
                Some(cached) => cached,
                None => {
                    self.transients.set(&key, handles.clone(), Some(self.ttl));
                    handles
                }
            }
        })
    }
}

/// Run `f` against a request with default settings and an empty registry.
#[cfg(test)]
pub fn test_request(f: impl FnOnce(&mut Request<'_>)) {
    let settings = Settings::default();
    let site = SiteUrls::new("https://example.com", "https://example.com/themes/child");
    let transients = crate::cache::MemoryTransients::new();
    let mut req = Request::new(
        &settings,
        Registry::default(),
        RequestFlags::default(),
        &site,
        &transients,
    );
    f(&mut req);
}
