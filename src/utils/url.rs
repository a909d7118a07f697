//! URL string helpers.
//!
//! These work on strings rather than `url::Url` because site roots may carry
//! a path (`https://example.com/blog`) that `Url::join` would drop for
//! root-relative input.

/// Check if a URL is absolute: scheme-prefixed or protocol-relative.
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("//") || ::url::Url::parse(url).is_ok_and(|u| !u.cannot_be_a_base())
}

/// Check if a URL is root-relative (`/path`, but not `//host`).
pub fn is_root_relative(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}

/// Join `path` onto `base` with exactly one slash between them.
pub fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{path}")
}

/// Append `key=value` to the query of `url`, before any fragment.
pub fn add_query_arg(url: &str, key: &str, value: &str) -> String {
    let (head, fragment) = match url.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (url, None),
    };
    let sep = if head.contains('?') { '&' } else { '?' };
    match fragment {
        Some(frag) => format!("{head}{sep}{key}={value}#{frag}"),
        None => format!("{head}{sep}{key}={value}"),
    }
}
