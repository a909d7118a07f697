//! `<link rel="preload">` hints for configured stylesheets and URLs.

use std::fmt::Write;

use crate::host::Request;
use crate::utils::html::escape_attr;
use crate::utils::mime;

/// Preload destination (`as` attribute) of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadType {
    pub as_: &'static str,
    /// Explicit MIME type (WOFF fonts only).
    pub mime: Option<&'static str>,
    pub crossorigin: bool,
}

impl PreloadType {
    const fn new(as_: &'static str) -> Self {
        Self {
            as_,
            mime: None,
            crossorigin: false,
        }
    }

    /// Infer the destination from the URL's extension.
    pub fn infer(url: &str) -> Self {
        let Some(ext) = mime::extension(url) else {
            return Self::new("fetch");
        };
        match ext.as_str() {
            "woff" | "woff2" | "ttf" | "otf" | "eot" => Self {
                as_: "font",
                mime: mime::font_type(&ext),
                crossorigin: true,
            },
            "css" => Self::new("style"),
            "js" => Self::new("script"),
            "jpg" | "jpeg" | "png" | "gif" | "svg" | "webp" => Self::new("image"),
            _ => Self::new("fetch"),
        }
    }
}

/// Preload every configured stylesheet handle that is registered.
pub fn preload_stylesheets(req: &Request<'_>, out: &mut String) {
    let Some(lists) = req.settings.preload.get() else {
        return;
    };
    for handle in &lists.css_handles {
        let Some(asset) = req.registry.styles.get(handle) else {
            continue;
        };
        if asset.src.is_empty() {
            continue;
        }
        let href = req.site.asset_src(asset);
        let _ = writeln!(
            out,
            r#"<link rel="preload" href="{}" as="style" />"#,
            escape_attr(&href)
        );
    }
}

/// Preload every configured custom URL.
pub fn preload_custom_urls(req: &Request<'_>, out: &mut String) {
    let Some(lists) = req.settings.preload.get() else {
        return;
    };
    for raw in &lists.custom_urls {
        let url = req.site.resolve(raw);
        let kind = PreloadType::infer(&url);

        let _ = write!(
            out,
            r#"<link rel="preload" href="{}" as="{}""#,
            escape_attr(&url),
            kind.as_
        );
        if let Some(mime) = kind.mime {
            let _ = write!(out, r#" type="{mime}""#);
        }
        if kind.crossorigin {
            out.push_str(" crossorigin");
        }
        out.push_str(">\n");
    }
}
