//! `critpath show`: print stored settings grouped by section.

use std::fmt::Write;

use anyhow::{Result, anyhow};
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::settings::form::{self, Section};
use crate::settings::{self, Record, parse_lines, text_of};

pub fn show(config: &Config, section: Option<&str>) -> Result<()> {
    let store = super::open_store(config);
    let record = settings::get_settings(&store);
    match section {
        Some(id) => print!("{}", format_section(find_section(id)?, &record, true)),
        None => print!("{}", format_settings(&record)),
    }
    Ok(())
}

fn find_section(id: &str) -> Result<&'static Section> {
    form::SECTIONS.iter().find(|s| s.id == id).ok_or_else(|| {
        let ids: Vec<_> = form::SECTIONS.iter().map(|s| s.id).collect();
        anyhow!("unknown section `{id}`, expected one of: {}", ids.join(", "))
    })
}

/// One block per section; dependent fields are listed only while enabled.
fn format_settings(record: &Record) -> String {
    form::SECTIONS
        .iter()
        .map(|section| format_section(section, record, false))
        .collect()
}

/// A section block. `detailed` adds the section description and field help.
fn format_section(section: &Section, record: &Record, detailed: bool) -> String {
    let mut out = String::new();
    let state = if section.is_enabled(record) {
        "on".green().to_string()
    } else {
        "off".dimmed().to_string()
    };
    let _ = writeln!(out, "{} [{}]", section.title.bold(), state);
    if detailed {
        let _ = writeln!(out, "  {}", section.description.dimmed());
    }

    for field in section.visible_fields(record) {
        if detailed {
            let _ = writeln!(out, "  {} {}", field.label, format!("({})", field.help).dimmed());
        }
        let lines = parse_lines(&text_of(record.get(field.key)));
        if lines.is_empty() {
            if !detailed {
                let _ = writeln!(out, "  {}: {}", field.label, "(none)".dimmed());
            }
            continue;
        }
        if !detailed {
            let _ = writeln!(out, "  {}:", field.label);
        }
        for line in lines {
            let _ = writeln!(out, "    - {line}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::strip_ansi;
    use serde_json::json;

    #[test]
    fn test_format_settings() {
        let mut record = Record::new();
        record.insert("dequeue_scripts_enabled".into(), json!(1));
        record.insert("dequeue_scripts_handles".into(), json!("jquery\n\nslider"));
        record.insert("defer_scripts_blocking_handles".into(), json!("hidden"));

        let out = strip_ansi(&format_settings(&record)).into_owned();
        assert!(out.contains("Dequeue Scripts [on]\n  Script Handles:\n    - jquery\n    - slider\n"));
        assert!(!out.contains("hidden"));
        assert_eq!(out.matches("[off]").count(), 5);
    }

    #[test]
    fn test_single_section_detail() {
        let mut record = Record::new();
        record.insert("preload_assets_enabled".into(), json!("1"));
        record.insert("preload_custom_urls".into(), json!("/fonts/a.woff2"));

        let section = find_section("preload-assets").unwrap();
        let out = strip_ansi(&format_section(section, &record, true)).into_owned();
        assert!(out.starts_with("Preload Assets [on]\n  Preload critical assets"));
        assert!(out.contains("  CSS Handles (stylesheet handles to preload, one per line)\n  Custom URLs ("));
        assert!(out.ends_with("    - /fonts/a.woff2\n"));
    }

    #[test]
    fn test_unknown_section_lists_ids() {
        let err = find_section("nope").unwrap_err().to_string();
        assert!(err.contains("dequeue-stylesheets, dequeue-scripts"));
    }
}
