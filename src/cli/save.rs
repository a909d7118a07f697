//! `critpath save`: sanitize a settings file and store it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::cache::MemoryTransients;
use crate::config::Config;
use crate::features;
use crate::logger;
use crate::settings::{self, MemoryStore, Record};

/// Read `input`, sanitize it and persist it under the settings key.
///
/// A dry run sanitizes into a scratch store and prints the result as JSON.
pub fn save(config: &Config, input: &Path, dry_run: bool) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read `{}`", input.display()))?;
    let raw = parse_input(input, &content)
        .with_context(|| format!("invalid settings file `{}`", input.display()))?;

    let hooks = features::register_all().context("failed to register hooks")?;
    if dry_run {
        let saved = settings::save_settings(&MemoryStore::new(), &hooks, &MemoryTransients::new(), &raw)?;
        println!("{}", serde_json::to_string_pretty(&saved)?);
        return Ok(());
    }

    let store = super::open_store(config);
    let transients = super::open_transients(config);

    let saved = settings::save_settings(&store, &hooks, &transients, &raw)?;
    let enabled = settings::form::SECTIONS
        .iter()
        .filter(|s| s.is_enabled(&saved))
        .count();
    logger::done(&format!(
        "saved to {} ({} of {} sections enabled)",
        store.path().display(),
        enabled,
        settings::form::SECTIONS.len()
    ));
    Ok(())
}

/// Parse a flat settings table. `.json` files are JSON, everything else TOML.
fn parse_input(path: &Path, content: &str) -> Result<Record> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let value: Value = if is_json {
        serde_json::from_str(content)?
    } else {
        let table: toml::Table = toml::from_str(content)?;
        serde_json::to_value(table)?
    };
    match value {
        Value::Object(record) => Ok(record),
        other => bail!("expected a table of settings, found {}", kind_of(&other)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}
