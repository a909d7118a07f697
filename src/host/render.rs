//! One page render: run the lifecycle and emit the `<head>` asset markup.

use super::Request;
use crate::hooks::{Event, HookTable, StyleTag};
use crate::utils::html::escape_attr;

/// What a render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Preload hints, stylesheet tags and script tags, in that order.
    pub head: String,
    /// Final answer of the `SeparateBlockAssets` filter.
    pub separate_block_assets: bool,
}

/// Run the request lifecycle against `hooks`.
///
/// 1. `EnqueueScripts` actions mutate the registry
/// 2. `SeparateBlockAssets` is asked with the host default (`false`)
/// 3. `Head` output is collected
/// 4. every queued stylesheet is emitted through `StyleLoaderTag`
/// 5. every queued script is emitted, with `defer` when its strategy says so
pub fn render_page(hooks: &HookTable, req: &mut Request<'_>) -> RenderOutput {
    hooks.run_actions(Event::EnqueueScripts, req);
    let req = &*req;

    let separate_block_assets = hooks.apply_flag_filters(Event::SeparateBlockAssets, req, false);
    let mut head = hooks.render_output(Event::Head, req);

    for asset in req.registry.styles.resolve() {
        if asset.src.is_empty() {
            continue;
        }
        let style = StyleTag {
            handle: asset.handle.clone(),
            href: req.site.asset_src(asset),
            media: asset.media.clone(),
        };
        let tag = format!(
            "<link rel='stylesheet' id='{}-css' href='{}' media='{}' />\n",
            escape_attr(&style.handle),
            escape_attr(&style.href),
            escape_attr(&style.media),
        );
        head.push_str(&hooks.apply_tag_filters(Event::StyleLoaderTag, req, tag, &style));
    }

    for asset in req.registry.scripts.resolve() {
        if asset.src.is_empty() {
            continue;
        }
        let strategy = match asset.strategy() {
            Some(s @ ("defer" | "async")) => format!(" {s}"),
            _ => String::new(),
        };
        head.push_str(&format!(
            "<script src='{}' id='{}-js'{}></script>\n",
            escape_attr(&req.site.asset_src(asset)),
            escape_attr(&asset.handle),
            strategy,
        ));
    }

    RenderOutput {
        head,
        separate_block_assets,
    }
}
