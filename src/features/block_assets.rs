//! Load block-editor styles separately, only for blocks on the page.

use crate::host::Request;

/// `SeparateBlockAssets` filter: force on when enabled, else pass through.
pub fn separate_block_assets(req: &Request<'_>, value: bool) -> bool {
    req.settings.block_assets_inline.is_on() || value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryTransients;
    use crate::host::{Registry, RequestFlags, SiteUrls};
    use crate::settings::{Settings, Toggle};

    fn answer(settings: &Settings, incoming: bool) -> bool {
        let site = SiteUrls::new("https://example.com", "https://example.com/theme");
        let transients = MemoryTransients::new();
        let req = Request::new(settings, Registry::default(), RequestFlags::default(), &site, &transients);
        separate_block_assets(&req, incoming)
    }

    #[test]
    fn test_enabled_forces_true() {
        let settings = Settings {
            block_assets_inline: Toggle::On(()),
            ..Settings::default()
        };
        assert!(answer(&settings, false));
    }

    #[test]
    fn test_disabled_passes_through() {
        assert!(!answer(&Settings::default(), false));
        assert!(answer(&Settings::default(), true));
    }
}
