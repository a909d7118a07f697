//! HTML utility functions.
//!
//! Provides the small amount of HTML handling the asset rewriters need:
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `find_start_tag()` - locate a start tag inside an emitted fragment
//! - `StartTag` - attribute-level view of one start tag that renders back
//!   with the original quote style of every attribute

use std::borrow::Cow;
use std::fmt;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape HTML attribute values.
///
/// Identical to `escape()` but semantically indicates attribute context.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

// =============================================================================
// Start Tag Model
// =============================================================================

/// Quote style of an attribute value as written in the source markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
    /// `name=value` without quotes.
    Bare,
}

impl Quote {
    fn as_str(self) -> &'static str {
        match self {
            Quote::Single => "'",
            Quote::Double => "\"",
            Quote::Bare => "",
        }
    }

    /// Pick a quote that can hold `value` verbatim, preferring `self`.
    fn fitting(self, value: &str) -> Quote {
        match self {
            Quote::Single if value.contains('\'') => Quote::Double,
            Quote::Double if value.contains('"') => Quote::Single,
            Quote::Bare if value.is_empty() || value.contains(char::is_whitespace) => {
                if value.contains('"') {
                    Quote::Single
                } else {
                    Quote::Double
                }
            }
            q => q,
        }
    }
}

/// A single attribute. `value` is kept exactly as written (entities are not
/// decoded), so rendering reproduces the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
    pub quote: Quote,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>, quote: Quote) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            quote: quote.fitting(&value),
            value: Some(value),
        }
    }
}

/// A parsed start tag such as `<link rel='stylesheet' href='a.css' />`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attrs: Vec<Attr>,
    pub self_closing: bool,
}

impl StartTag {
    /// Get an attribute value by (ASCII case-insensitive) name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Quote style to use for attributes this code adds: the style of the
    /// first quoted attribute, or double quotes.
    pub fn preferred_quote(&self) -> Quote {
        self.attrs
            .iter()
            .map(|a| a.quote)
            .find(|q| *q != Quote::Bare)
            .unwrap_or(Quote::Double)
    }

    /// Set an attribute value. Existing attributes keep their position and
    /// quote style; new ones are appended.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(attr) = self
            .attrs
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            attr.quote = attr.quote.fitting(&value);
            attr.value = Some(value);
            return;
        }
        let quote = self.preferred_quote();
        self.attrs.push(Attr::new(name, value, quote));
    }

    /// Insert (or replace) `attr` directly after the attribute named `anchor`.
    /// Falls back to appending when `anchor` is absent.
    pub fn set_after(&mut self, anchor: &str, attr: Attr) {
        self.attrs.retain(|a| !a.name.eq_ignore_ascii_case(&attr.name));
        match self
            .attrs
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(anchor))
        {
            Some(pos) => self.attrs.insert(pos + 1, attr),
            None => self.attrs.push(attr),
        }
    }
}

impl fmt::Display for StartTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attr in &self.attrs {
            match &attr.value {
                Some(value) => {
                    let q = attr.quote.as_str();
                    write!(f, " {}={q}{value}{q}", attr.name)?;
                }
                None => write!(f, " {}", attr.name)?,
            }
        }
        if self.self_closing {
            f.write_str(" />")
        } else {
            f.write_str(">")
        }
    }
}

/// A start tag found inside a fragment, with the text around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan<'a> {
    pub before: &'a str,
    pub tag: StartTag,
    pub after: &'a str,
}

// =============================================================================
// Start Tag Parsing
// =============================================================================

/// Locate the first `<name ...>` start tag in `html`.
///
/// Returns `None` if the tag is absent or not terminated.
pub fn find_start_tag<'a>(html: &'a str, name: &str) -> Option<TagSpan<'a>> {
    let lower = html.to_ascii_lowercase();
    let needle = format!("<{}", name.to_ascii_lowercase());

    let mut search_from = 0;
    let start = loop {
        let pos = search_from + lower[search_from..].find(&needle)?;
        let next = lower[pos + needle.len()..].chars().next();
        if matches!(next, Some(c) if c.is_whitespace() || c == '/' || c == '>') {
            break pos;
        }
        search_from = pos + needle.len();
    };

    let body_start = start + needle.len();
    let end = tag_end(&html[body_start..])? + body_start;

    let mut body = html[body_start..end].trim_end();
    let self_closing = body.ends_with('/')
        && body[..body.len() - 1]
            .chars()
            .last()
            .is_none_or(|c| c.is_whitespace() || c == '"' || c == '\'');
    if self_closing {
        body = &body[..body.len() - 1];
    }

    Some(TagSpan {
        before: &html[..start],
        tag: StartTag {
            name: html[start + 1..body_start].to_string(),
            attrs: parse_attributes(body),
            self_closing,
        },
        after: &html[end + 1..],
    })
}

/// Byte offset of the `>` closing a tag body, ignoring `>` inside quotes.
fn tag_end(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Parse HTML-style attributes from a string, keeping quote styles.
///
/// Input: `rel='stylesheet' media="all" disabled`
/// Output: `rel` (single), `media` (double), `disabled` (no value)
pub fn parse_attributes(s: &str) -> Vec<Attr> {
    let mut attrs = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        // Read attribute name
        let mut name = String::from(c);
        while let Some(&next) = chars.peek() {
            if next == '=' || next.is_whitespace() {
                break;
            }
            name.push(next);
            chars.next();
        }

        // Skip whitespace
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        if chars.peek() != Some(&'=') {
            // Boolean attribute (no value)
            attrs.push(Attr {
                name,
                value: None,
                quote: Quote::Bare,
            });
            continue;
        }
        chars.next(); // consume '='

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let (value, quote) = match chars.peek().copied() {
            Some(q @ ('"' | '\'')) => {
                chars.next();
                let mut val = String::new();
                for c in chars.by_ref() {
                    if c == q {
                        break;
                    }
                    val.push(c);
                }
                let quote = if q == '"' { Quote::Double } else { Quote::Single };
                (val, quote)
            }
            _ => {
                let mut val = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    val.push(c);
                    chars.next();
                }
                (val, Quote::Bare)
            }
        };

        attrs.push(Attr {
            name,
            value: Some(value),
            quote,
        });
    }

    attrs
}
