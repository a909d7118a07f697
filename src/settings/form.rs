//! Settings form layout.
//!
//! Six sections, each with an enable checkbox and zero to two dependent
//! text areas. Dependent fields are only shown while their checkbox is on,
//! which is also the rule that makes their content count at render time.
//!
//! This table is the single source of field names for sanitizing and for
//! the `show` command.

use super::record::{Record, is_truthy};

/// What a text area holds, and therefore how it is sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Asset handles, one per line.
    Handles,
    /// Absolute URLs, root-relative paths or theme-relative asset paths.
    Urls,
}

/// A dependent text area.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub kind: FieldKind,
}

/// One settings section.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Key of the enable checkbox.
    pub toggle: &'static str,
    pub fields: &'static [Field],
}

impl Section {
    /// Whether the section's checkbox is on in `record`.
    pub fn is_enabled(&self, record: &Record) -> bool {
        is_truthy(record.get(self.toggle))
    }

    /// Fields shown for `record`: all of them when enabled, none otherwise.
    pub fn visible_fields(&self, record: &Record) -> &'static [Field] {
        if self.is_enabled(record) {
            self.fields
        } else {
            &[]
        }
    }
}

pub const SECTIONS: &[Section] = &[
    Section {
        id: "dequeue-stylesheets",
        title: "Dequeue Stylesheets",
        description: "Remove unused stylesheets from loading on your site.",
        toggle: "dequeue_stylesheets_enabled",
        fields: &[Field {
            key: "dequeue_stylesheets_handles",
            label: "Stylesheet Handles",
            help: "stylesheet handles to dequeue, one per line",
            kind: FieldKind::Handles,
        }],
    },
    Section {
        id: "dequeue-scripts",
        title: "Dequeue Scripts",
        description: "Remove unused scripts from loading on your site.",
        toggle: "dequeue_scripts_enabled",
        fields: &[Field {
            key: "dequeue_scripts_handles",
            label: "Script Handles",
            help: "script handles to dequeue, one per line",
            kind: FieldKind::Handles,
        }],
    },
    Section {
        id: "defer-stylesheets",
        title: "Globally Defer Stylesheets",
        description: "Defer non-critical stylesheets. Stylesheets NOT in the render-blocking list are deferred.",
        toggle: "defer_stylesheets_enabled",
        fields: &[Field {
            key: "defer_stylesheets_blocking_handles",
            label: "Render-Blocking Handles",
            help: "stylesheet handles that stay render-blocking, one per line",
            kind: FieldKind::Handles,
        }],
    },
    Section {
        id: "defer-scripts",
        title: "Globally Defer Scripts",
        description: "Defer non-critical scripts through the loading-strategy API. Scripts NOT in the blocking list are deferred.",
        toggle: "defer_scripts_enabled",
        fields: &[Field {
            key: "defer_scripts_blocking_handles",
            label: "Blocking Script Handles",
            help: "script handles that must not be deferred, one per line",
            kind: FieldKind::Handles,
        }],
    },
    Section {
        id: "gutenberg-css",
        title: "Load Block CSS Inline",
        description: "Load block stylesheets only when the block is used on the page.",
        toggle: "gutenberg_css_inline_enabled",
        fields: &[],
    },
    Section {
        id: "preload-assets",
        title: "Preload Assets",
        description: "Preload critical assets like stylesheets and fonts to improve LCP.",
        toggle: "preload_assets_enabled",
        fields: &[
            Field {
                key: "preload_css_handles",
                label: "CSS Handles",
                help: "stylesheet handles to preload, one per line",
                kind: FieldKind::Handles,
            },
            Field {
                key: "preload_custom_urls",
                label: "Custom URLs",
                help: "URLs to preload (fonts etc.), one per line; /root-relative or theme-relative paths allowed",
                kind: FieldKind::Urls,
            },
        ],
    },
];

/// Iterate every dependent text field across all sections.
pub fn text_fields() -> impl Iterator<Item = &'static Field> {
    SECTIONS.iter().flat_map(|s| s.fields.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_six_sections_six_text_fields() {
        assert_eq!(SECTIONS.len(), 6);
        assert_eq!(text_fields().count(), 6);
        assert_eq!(
            text_fields().filter(|f| f.kind == FieldKind::Urls).count(),
            1
        );
    }

    #[test]
    fn test_visible_fields_follow_toggle() {
        let preload = SECTIONS.iter().find(|s| s.id == "preload-assets").unwrap();
        let mut record = Record::new();
        assert!(preload.visible_fields(&record).is_empty());

        record.insert("preload_assets_enabled".into(), json!(1));
        assert_eq!(preload.visible_fields(&record).len(), 2);
    }
}
