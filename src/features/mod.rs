//! The performance components and their hook registrations.
//!
//! | Component            | Event                 | Priority  |
//! |----------------------|-----------------------|-----------|
//! | dequeue stylesheets  | `EnqueueScripts`      | LATE      |
//! | dequeue scripts      | `EnqueueScripts`      | LATE      |
//! | defer scripts        | `EnqueueScripts`      | VERY_LATE |
//! | defer stylesheets    | `StyleLoaderTag`      | DEFAULT   |
//! | preload stylesheets  | `Head`                | EARLY     |
//! | preload custom URLs  | `Head`                | EARLY     |
//! | block assets         | `SeparateBlockAssets` | DEFAULT   |
//! | clear transients     | lifecycle events      | DEFAULT   |

mod block_assets;
mod defer_scripts;
mod defer_styles;
mod dequeue;
mod invalidate;
mod preload;

pub use block_assets::separate_block_assets;
pub use defer_scripts::defer_scripts;
pub use defer_styles::defer_stylesheet;
pub use dequeue::{dequeue_scripts, dequeue_stylesheets};
pub use invalidate::clear_transients;
pub use preload::{preload_custom_urls, preload_stylesheets};

use crate::hooks::{Callback, Event, HookError, HookTable, Priority};

/// Events that invalidate cached lists.
pub const INVALIDATING_EVENTS: [Event; 5] = [
    Event::PluginActivated,
    Event::PluginDeactivated,
    Event::ThemeSwitched,
    Event::UpgradeComplete,
    Event::SettingsSaved,
];

/// Build the hook table with every component subscribed.
pub fn register_all() -> Result<HookTable, HookError> {
    let mut hooks = HookTable::new();
    hooks
        .add(
            Event::EnqueueScripts,
            Priority::LATE,
            "dequeue_stylesheets",
            Callback::Action(dequeue_stylesheets),
        )?
        .add(
            Event::EnqueueScripts,
            Priority::LATE,
            "dequeue_scripts",
            Callback::Action(dequeue_scripts),
        )?
        .add(
            Event::EnqueueScripts,
            Priority::VERY_LATE,
            "defer_scripts",
            Callback::Action(defer_scripts),
        )?
        .add(
            Event::StyleLoaderTag,
            Priority::DEFAULT,
            "defer_stylesheet",
            Callback::TagFilter(defer_stylesheet),
        )?
        .add(
            Event::Head,
            Priority::EARLY,
            "preload_stylesheets",
            Callback::Output(preload_stylesheets),
        )?
        .add(
            Event::Head,
            Priority::EARLY,
            "preload_custom_urls",
            Callback::Output(preload_custom_urls),
        )?
        .add(
            Event::SeparateBlockAssets,
            Priority::DEFAULT,
            "separate_block_assets",
            Callback::FlagFilter(separate_block_assets),
        )?;

    for event in INVALIDATING_EVENTS {
        hooks.add(
            event,
            Priority::DEFAULT,
            "clear_transients",
            Callback::Lifecycle(clear_transients),
        )?;
    }
    Ok(hooks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryTransients, Transients};
    use crate::host::{RegisteredAsset, Registry, Request, RequestFlags, SiteUrls, render_page};
    use crate::settings::{PreloadLists, Settings, Toggle};

    fn registry() -> Registry {
        let mut registry = Registry::default();
        registry
            .styles
            .register(RegisteredAsset::new("critical", "/critical.css"));
        registry
            .styles
            .register(RegisteredAsset::new("theme", "/style.css").with_ver("1"));
        registry.styles.register(RegisteredAsset::new("unused", "/unused.css"));
        registry
            .styles
            .register(RegisteredAsset::new("print", "/print.css").with_media("print"));
        for handle in ["critical", "theme", "unused", "print"] {
            registry.styles.enqueue(handle);
        }
        registry.scripts.register(RegisteredAsset::new("jquery", "/jquery.js"));
        registry.scripts.register(RegisteredAsset::new("app", "/app.js"));
        registry.scripts.enqueue("jquery");
        registry.scripts.enqueue("app");
        registry
    }

    fn settings() -> Settings {
        Settings {
            dequeue_styles: Toggle::On(vec!["unused".into()]),
            dequeue_scripts: Toggle::Off,
            defer_styles: Toggle::On(vec!["critical".into()]),
            defer_scripts: Toggle::On(vec!["jquery".into()]),
            block_assets_inline: Toggle::On(()),
            preload: Toggle::On(PreloadLists {
                css_handles: vec!["theme".into()],
                custom_urls: vec!["/fonts/a.woff2".into()],
            }),
        }
    }

    #[test]
    fn test_register_all_rows() {
        let hooks = register_all().unwrap();
        assert_eq!(hooks.rows().len(), 7 + INVALIDATING_EVENTS.len());

        let names: Vec<_> = hooks
            .subscribers(Event::EnqueueScripts)
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["dequeue_stylesheets", "dequeue_scripts", "defer_scripts"]);
    }

    #[test]
    fn test_full_render() {
        let hooks = register_all().unwrap();
        let settings = settings();
        let site = SiteUrls::new("https://example.com", "https://example.com/theme");
        let transients = MemoryTransients::new();
        let mut req = Request::new(&settings, registry(), RequestFlags::default(), &site, &transients);

        let out = render_page(&hooks, &mut req);
        assert!(out.separate_block_assets);
        assert_eq!(
            out.head,
            "<link rel=\"preload\" href=\"https://example.com/style.css?ver=1\" as=\"style\" />\n\
             <link rel=\"preload\" href=\"https://example.com/fonts/a.woff2\" as=\"font\" type=\"font/woff2\" crossorigin>\n\
             <link rel='stylesheet' id='critical-css' href='https://example.com/critical.css' media='all' />\n\
             <noscript><link rel='stylesheet' id='fallback-theme-css' href='https://example.com/style.css?ver=1' media='all' /></noscript>\
             <link rel='stylesheet' id='theme-css' href='https://example.com/style.css?ver=1' media='print' onload=\"this.media='all'; this.onload=null;\" />\n\
             <link rel='stylesheet' id='print-css' href='https://example.com/print.css' media='print' />\n\
             <script src='https://example.com/jquery.js' id='jquery-js'></script>\n\
             <script src='https://example.com/app.js' id='app-js' defer></script>\n"
        );
    }

    #[test]
    fn test_settings_saved_clears_cache() {
        let hooks = register_all().unwrap();
        let transients = MemoryTransients::new();
        transients.set("defer_styles_x", vec!["a".into()], None);
        transients.set("defer_scripts_x", vec!["b".into()], None);
        hooks.fire(Event::SettingsSaved, &transients);
        assert_eq!(transients.len(), 0);
    }
}
