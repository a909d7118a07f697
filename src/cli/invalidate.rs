//! `critpath invalidate`: fire a host lifecycle event.

use anyhow::{Context, Result, bail};

use crate::config::Config;
use crate::debug;
use crate::features;
use crate::hooks::{Event, Shape};
use crate::logger;

/// Events a user may fire by hand. Saving settings fires its own.
const FIREABLE: [Event; 4] = [
    Event::PluginActivated,
    Event::PluginDeactivated,
    Event::ThemeSwitched,
    Event::UpgradeComplete,
];

pub fn invalidate(config: &Config, name: &str) -> Result<()> {
    let event = parse_event(name)?;
    let hooks = features::register_all().context("failed to register hooks")?;
    let transients = super::open_transients(config);
    debug!("cache"; "dir: {}", transients.dir().display());

    hooks.fire(event, &transients);
    logger::done(&format!("fired {event}"));
    Ok(())
}

fn parse_event(name: &str) -> Result<Event> {
    match Event::from_name(name) {
        Some(event) if FIREABLE.contains(&event) => Ok(event),
        Some(event) if event.shape() == Shape::Lifecycle => {
            bail!("`{event}` is fired by `critpath save`")
        }
        _ => {
            let names: Vec<_> = FIREABLE.iter().map(|e| e.name()).collect();
            bail!("unknown event `{name}`, expected one of: {}", names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FileTransients, Transients};

    #[test]
    fn test_parse_event() {
        assert_eq!(parse_event("theme-switched").unwrap(), Event::ThemeSwitched);
        assert!(parse_event("settings-saved").is_err());
        assert!(parse_event("head").unwrap_err().to_string().contains("unknown event"));
    }

    #[test]
    fn test_invalidate_clears_file_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.cache.dir = dir.path().join("cache");

        let transients = FileTransients::new(&config.cache.dir);
        transients.set("defer_styles_abc", vec!["theme".into()], None);
        transients.set("keep", vec![], None);

        invalidate(&config, "plugin-activated").unwrap();
        assert!(transients.get("defer_styles_abc").is_none());
        assert!(transients.get("keep").is_some());
    }
}
