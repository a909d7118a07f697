//! Save-time sanitization of submitted settings.
//!
//! Invalid lines are dropped silently; there is no per-line feedback.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::form::{FieldKind, SECTIONS, text_fields};
use super::record::{Record, is_truthy, text_of};

static RE_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap());

static RE_RELATIVE_ASSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_./-]+\.(?i-u:woff2?|ttf|otf|eot|css|js|jpg|jpeg|png|gif|svg|webp)$")
        .unwrap()
});

/// Schemes kept by URL cleaning.
const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Characters kept by URL cleaning besides ASCII alphanumerics.
const URL_SAFE: &str = "-~+_.?#=!&;,/:%@$|*'()[]";

/// Sanitize a submitted record into its persisted form.
///
/// - every enable flag becomes `0` or `1`
/// - handle fields keep lines matching `[A-Za-z0-9_.-]+`
/// - the URL field keeps absolute URLs, root-relative paths and
///   theme-relative asset paths
/// - absent text fields become `""`
pub fn sanitize(input: &Record) -> Record {
    let mut out = Record::new();

    for section in SECTIONS {
        let flag = i64::from(is_truthy(input.get(section.toggle)));
        out.insert(section.toggle.to_string(), Value::from(flag));
    }

    for field in text_fields() {
        let raw = text_of(input.get(field.key));
        let kept: Vec<String> = raw
            .split('\n')
            .map(str::trim)
            .filter_map(|line| match field.kind {
                FieldKind::Handles => is_valid_handle(line).then(|| line.to_string()),
                FieldKind::Urls => sanitize_url_line(line),
            })
            .collect();
        out.insert(field.key.to_string(), Value::from(kept.join("\n")));
    }

    out
}

/// Check if `line` is a valid asset handle.
pub fn is_valid_handle(line: &str) -> bool {
    RE_HANDLE.is_match(line)
}

/// Sanitize one trimmed line of the custom-URL field.
pub fn sanitize_url_line(line: &str) -> Option<String> {
    if line.is_empty() {
        return None;
    }
    if line.starts_with('/') || is_valid_absolute(line) {
        return clean_url(line);
    }
    RE_RELATIVE_ASSET
        .is_match(line)
        .then(|| line.to_string())
}

/// Absolute URL with a scheme and a host.
fn is_valid_absolute(line: &str) -> bool {
    url::Url::parse(line).is_ok_and(|u| u.has_host())
}

/// Strip characters that have no place in a URL and reject non-web schemes.
fn clean_url(url: &str) -> Option<String> {
    let cleaned: String = url
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || URL_SAFE.contains(*c))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    if !cleaned.starts_with('/')
        && let Some((scheme, _)) = cleaned.split_once(':')
        && !ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
    {
        return None;
    }

    Some(cleaned)
}
