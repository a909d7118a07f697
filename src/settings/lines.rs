//! Multi-line text field parsing.

/// Split a text field into entries.
///
/// Splits on `\n`, trims every entry, drops empty ones. Order is kept and
/// duplicates are allowed.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
