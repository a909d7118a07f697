//! Load non-critical stylesheets without blocking render.
//!
//! A deferred stylesheet is emitted twice:
//!
//! ```html
//! <noscript><link rel='stylesheet' id='fallback-theme-css' href='...' media='all' /></noscript>
//! <link rel='stylesheet' id='theme-css' href='...' media='print' onload="this.media='all'; this.onload=null;" />
//! ```
//!
//! The `print` media keeps the browser from blocking on it; `onload` flips
//! it to `all` once fetched. The `<noscript>` copy covers script-less
//! clients.

use std::fmt::Write;

use crate::hooks::StyleTag;
use crate::host::Request;
use crate::utils::html::{self, Attr, StartTag};

const PRINT: &str = "print";
const FALLBACK_PREFIX: &str = "fallback-";
const ONLOAD: &str = "this.media='all'; this.onload=null;";

/// `StyleLoaderTag` filter.
pub fn defer_stylesheet(req: &Request<'_>, tag: String, style: &StyleTag) -> String {
    if !req.settings.defer_styles.is_on() || req.flags.admin_bar || !req.is_frontend() {
        return tag;
    }

    let mut out = String::with_capacity(tag.len() * 2);
    let mut rest = tag.as_str();
    let mut checked_blocking = false;

    // Every `<link>` in the fragment is handled, e.g. an RTL companion.
    while let Some(span) = html::find_start_tag(rest, "link") {
        let source = &rest[span.before.len()..rest.len() - span.after.len()];
        out.push_str(span.before);

        let media = span.tag.get("media").unwrap_or(&style.media);
        if media.trim().eq_ignore_ascii_case(PRINT) {
            out.push_str(source);
            rest = span.after;
            continue;
        }
        if !checked_blocking {
            if req.render_blocking_handles().contains(&style.handle) {
                return tag;
            }
            checked_blocking = true;
        }

        let _ = write!(out, "<noscript>{}</noscript>{}", fallback_tag(&span.tag), deferred_tag(&span.tag));
        rest = span.after;
    }
    out.push_str(rest);
    out
}

/// A copy of `live` whose id carries the fallback prefix.
fn fallback_tag(live: &StartTag) -> StartTag {
    let mut tag = live.clone();
    if let Some(id) = tag.get("id").filter(|id| !id.is_empty()) {
        let id = format!("{FALLBACK_PREFIX}{id}");
        tag.set("id", id);
    }
    tag
}

/// A copy of `live` with `media='print'` and a self-clearing `onload`.
fn deferred_tag(live: &StartTag) -> StartTag {
    let mut tag = live.clone();
    tag.set("media", PRINT);

    // `Attr::new` switches to double quotes around the handler's single ones
    tag.set_after("media", Attr::new("onload", ONLOAD, tag.preferred_quote()));
    tag
}
