//! MIME type and extension helpers for preload hints.

/// MIME type constants used in `type` attributes.
pub mod types {
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
}

/// Lowercased extension of the last path segment of a URL or path.
///
/// Query strings and fragments are ignored, so `a.WOFF2?v=3#x` yields
/// `woff2`. Dotfiles (`.htaccess`) and extensionless names yield `None`.
pub fn extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Font MIME type for the `type` attribute of a font preload.
///
/// Only WOFF flavors get an explicit type; browsers sniff the rest.
pub fn font_type(ext: &str) -> Option<&'static str> {
    match ext {
        "woff2" => Some(types::WOFF2),
        "woff" => Some(types::WOFF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(extension("font.woff2").as_deref(), Some("woff2"));
        assert_eq!(extension("/a/b/Style.CSS").as_deref(), Some("css"));
        assert_eq!(extension("https://x.com/a.js?ver=1.2#top").as_deref(), Some("js"));
        assert_eq!(extension("https://x.com/dir.v2/file"), None);
        assert_eq!(extension(".htaccess"), None);
        assert_eq!(extension("noext"), None);
    }

    #[test]
    fn test_font_type() {
        assert_eq!(font_type("woff2"), Some(types::WOFF2));
        assert_eq!(font_type("woff"), Some(types::WOFF));
        assert_eq!(font_type("ttf"), None);
    }
}
