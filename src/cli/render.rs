//! `critpath render`: run one request against an asset manifest.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cache::{MemoryTransients, Transients};
use crate::config::Config;
use crate::features;
use crate::host::{Manifest, Request, render_page};
use crate::settings::Settings;
use crate::{debug, log};

/// Render the `<head>` asset markup to stdout.
///
/// With `no_cache`, cached lists live only for this run.
pub fn render(config: &Config, assets: &Path, no_cache: bool) -> Result<()> {
    if no_cache {
        let transients = MemoryTransients::new();
        render_with(config, assets, &transients)?;
        debug!("render"; "{} transient(s) discarded", transients.len());
        Ok(())
    } else {
        render_with(config, assets, &super::open_transients(config))
    }
}

fn render_with(config: &Config, assets: &Path, transients: &dyn Transients) -> Result<()> {
    let manifest = Manifest::from_path(assets)?;
    let hooks = features::register_all().context("failed to register hooks")?;

    let store = super::open_store(config);
    let settings = Settings::load(&store);
    let site = config.site.urls();
    let flags = config.request.flags();
    debug!("render"; "flags: {:?}", flags);

    let mut req = Request::new(&settings, manifest.to_registry(), flags, &site, transients)
        .with_ttl(config.cache.ttl());
    let output = render_page(&hooks, &mut req);

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.head.as_bytes())?;
    stdout.flush()?;

    log!(
        "render";
        "{} styles, {} scripts, separate block assets: {}",
        req.registry.styles.queue().len(),
        req.registry.scripts.queue().len(),
        output.separate_block_assets
    );
    Ok(())
}
