//! Remove configured stylesheets and scripts from the render queue.

use crate::host::Request;

/// Dequeue and deregister every configured stylesheet handle.
///
/// Deregistering keeps dependency resolution from pulling the handle back in.
pub fn dequeue_stylesheets(req: &mut Request<'_>) {
    let Some(handles) = req.settings.dequeue_styles.get() else {
        return;
    };
    for handle in handles {
        req.registry.styles.dequeue(handle);
        req.registry.styles.deregister(handle);
    }
}

/// Dequeue every configured script handle.
pub fn dequeue_scripts(req: &mut Request<'_>) {
    let Some(handles) = req.settings.dequeue_scripts.get() else {
        return;
    };
    for handle in handles {
        req.registry.scripts.dequeue(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryTransients;
    use crate::host::{RegisteredAsset, Registry, RequestFlags, SiteUrls};
    use crate::settings::{Settings, Toggle};

    fn registry() -> Registry {
        let mut registry = Registry::default();
        for handle in ["a", "b", "c"] {
            registry.styles.register(RegisteredAsset::new(handle, format!("/{handle}.css")));
            registry.styles.enqueue(handle);
            registry.scripts.register(RegisteredAsset::new(handle, format!("/{handle}.js")));
            registry.scripts.enqueue(handle);
        }
        registry
    }

    fn run(settings: &Settings) -> Registry {
        let site = SiteUrls::new("https://example.com", "https://example.com/theme");
        let transients = MemoryTransients::new();
        let mut req = Request::new(settings, registry(), RequestFlags::default(), &site, &transients);
        dequeue_stylesheets(&mut req);
        dequeue_scripts(&mut req);
        req.registry
    }

    #[test]
    fn test_dequeue_enabled() {
        let settings = Settings {
            dequeue_styles: Toggle::On(vec!["a".into(), "b".into()]),
            dequeue_scripts: Toggle::On(vec!["a".into(), "b".into(), "unknown".into()]),
            ..Settings::default()
        };
        let registry = run(&settings);
        assert_eq!(registry.styles.queue(), ["c"]);
        assert_eq!(registry.scripts.queue(), ["c"]);
        assert!(registry.styles.get("a").is_none());
        // scripts stay registered
        assert!(registry.scripts.get("a").is_some());
    }

    #[test]
    fn test_dequeue_disabled_is_noop() {
        let registry = run(&Settings::default());
        assert_eq!(registry.styles.queue(), ["a", "b", "c"]);
        assert_eq!(registry.scripts.queue(), ["a", "b", "c"]);
    }

    #[test]
    fn test_dequeued_stylesheet_not_readded_by_dependency() {
        let settings = Settings {
            dequeue_styles: Toggle::On(vec!["a".into()]),
            ..Settings::default()
        };
        let site = SiteUrls::new("https://example.com", "https://example.com/theme");
        let transients = MemoryTransients::new();
        let mut registry = Registry::default();
        registry.styles.register(RegisteredAsset::new("a", "/a.css"));
        registry
            .styles
            .register(RegisteredAsset::new("main", "/main.css").with_deps(&["a"]));
        registry.styles.enqueue("main");

        let mut req = Request::new(&settings, registry, RequestFlags::default(), &site, &transients);
        dequeue_stylesheets(&mut req);
        let resolved: Vec<_> = req.registry.styles.resolve().iter().map(|a| a.handle.clone()).collect();
        assert_eq!(resolved, ["main"]);
    }
}
