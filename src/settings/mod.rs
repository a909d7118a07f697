//! The settings record: storage, parsing, sanitizing.
//!
//! # Module Structure
//!
//! ```text
//! settings/
//! ├── form       # Section/field layout (single source of field names)
//! ├── lines      # parse_lines
//! ├── record     # Record type, truthiness rules
//! ├── sanitize   # Save-time sanitization
//! ├── store      # OptionStore trait, memory and JSON-file stores
//! └── mod.rs     # Typed Settings snapshot (this file)
//! ```
//!
//! The persisted form is a flat [`Record`] stored under [`SETTINGS_KEY`].
//! Components never read it directly; they get a typed [`Settings`]
//! snapshot where each feature is a [`Toggle`], so a list that belongs to a
//! disabled feature cannot be reached at all.

pub mod form;
mod lines;
mod record;
mod sanitize;
mod store;

pub use lines::parse_lines;
pub use record::{Record, is_truthy, text_of};
pub use sanitize::sanitize;
pub use store::{JsonFileStore, MemoryStore, OptionStore, StoreError};

use crate::cache::Transients;
use crate::debug;
use crate::hooks::{Event, HookTable};

/// Option name under which the settings record is stored.
pub const SETTINGS_KEY: &str = "critical_path_settings";

/// Persisted field names.
pub mod keys {
    pub const DEQUEUE_STYLESHEETS_ENABLED: &str = "dequeue_stylesheets_enabled";
    pub const DEQUEUE_STYLESHEETS_HANDLES: &str = "dequeue_stylesheets_handles";
    pub const DEQUEUE_SCRIPTS_ENABLED: &str = "dequeue_scripts_enabled";
    pub const DEQUEUE_SCRIPTS_HANDLES: &str = "dequeue_scripts_handles";
    pub const DEFER_STYLESHEETS_ENABLED: &str = "defer_stylesheets_enabled";
    pub const DEFER_STYLESHEETS_BLOCKING_HANDLES: &str = "defer_stylesheets_blocking_handles";
    pub const DEFER_SCRIPTS_ENABLED: &str = "defer_scripts_enabled";
    pub const DEFER_SCRIPTS_BLOCKING_HANDLES: &str = "defer_scripts_blocking_handles";
    pub const GUTENBERG_CSS_INLINE_ENABLED: &str = "gutenberg_css_inline_enabled";
    pub const PRELOAD_ASSETS_ENABLED: &str = "preload_assets_enabled";
    pub const PRELOAD_CSS_HANDLES: &str = "preload_css_handles";
    pub const PRELOAD_CUSTOM_URLS: &str = "preload_custom_urls";
}

// ============================================================================
// Typed snapshot
// ============================================================================

/// A feature flag together with the data it enables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Toggle<T> {
    #[default]
    Off,
    On(T),
}

impl<T> Toggle<T> {
    /// Build from a flag and a payload that is only computed when on.
    pub fn when(enabled: bool, payload: impl FnOnce() -> T) -> Self {
        if enabled {
            Toggle::On(payload())
        } else {
            Toggle::Off
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, Toggle::On(_))
    }

    /// The payload if the feature is on.
    pub fn get(&self) -> Option<&T> {
        match self {
            Toggle::On(payload) => Some(payload),
            Toggle::Off => None,
        }
    }
}

/// Lists used by the preloader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreloadLists {
    pub css_handles: Vec<String>,
    pub custom_urls: Vec<String>,
}

/// Typed view of one settings record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub dequeue_styles: Toggle<Vec<String>>,
    pub dequeue_scripts: Toggle<Vec<String>>,
    /// Stylesheets that stay render-blocking.
    pub defer_styles: Toggle<Vec<String>>,
    /// Scripts that stay blocking.
    pub defer_scripts: Toggle<Vec<String>>,
    pub block_assets_inline: Toggle<()>,
    pub preload: Toggle<PreloadLists>,
}

impl Settings {
    /// Derive the typed view from a stored record.
    pub fn from_record(record: &Record) -> Self {
        let flag = |key: &str| is_truthy(record.get(key));
        let list = |key: &str| parse_lines(&text_of(record.get(key)));

        Self {
            dequeue_styles: Toggle::when(flag(keys::DEQUEUE_STYLESHEETS_ENABLED), || {
                list(keys::DEQUEUE_STYLESHEETS_HANDLES)
            }),
            dequeue_scripts: Toggle::when(flag(keys::DEQUEUE_SCRIPTS_ENABLED), || {
                list(keys::DEQUEUE_SCRIPTS_HANDLES)
            }),
            defer_styles: Toggle::when(flag(keys::DEFER_STYLESHEETS_ENABLED), || {
                list(keys::DEFER_STYLESHEETS_BLOCKING_HANDLES)
            }),
            defer_scripts: Toggle::when(flag(keys::DEFER_SCRIPTS_ENABLED), || {
                list(keys::DEFER_SCRIPTS_BLOCKING_HANDLES)
            }),
            block_assets_inline: Toggle::when(flag(keys::GUTENBERG_CSS_INLINE_ENABLED), || ()),
            preload: Toggle::when(flag(keys::PRELOAD_ASSETS_ENABLED), || PreloadLists {
                css_handles: list(keys::PRELOAD_CSS_HANDLES),
                custom_urls: list(keys::PRELOAD_CUSTOM_URLS),
            }),
        }
    }

    /// Load the current snapshot from `store`.
    pub fn load(store: &dyn OptionStore) -> Self {
        Self::from_record(&get_settings(store))
    }
}

// ============================================================================
// Reading and saving
// ============================================================================

/// Read the persisted settings record.
///
/// Never fails: a missing record or an unreadable store yields an empty
/// record, which disables every feature.
pub fn get_settings(store: &dyn OptionStore) -> Record {
    match store.get(SETTINGS_KEY) {
        Ok(Some(record)) => record,
        Ok(None) => Record::new(),
        Err(e) => {
            debug!("store"; "falling back to empty settings: {}", e);
            Record::new()
        }
    }
}

/// Sanitize and persist a submitted record, then fire `SettingsSaved`.
///
/// Returns the record as stored.
pub fn save_settings(
    store: &dyn OptionStore,
    hooks: &HookTable,
    transients: &dyn Transients,
    input: &Record,
) -> Result<Record, StoreError> {
    let clean = sanitize(input);
    store.put(SETTINGS_KEY, clean.clone())?;
    hooks.fire(Event::SettingsSaved, transients);
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryTransients;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_record_disables_everything() {
        assert_eq!(Settings::from_record(&Record::new()), Settings::default());
    }

    #[test]
    fn test_list_ignored_when_flag_off() {
        let settings = Settings::from_record(&record(json!({
            "dequeue_scripts_enabled": 0,
            "dequeue_scripts_handles": "jquery",
            "preload_assets_enabled": "1",
            "preload_css_handles": "theme\n\n fonts ",
        })));
        assert_eq!(settings.dequeue_scripts, Toggle::Off);
        let preload = settings.preload.get().unwrap();
        assert_eq!(preload.css_handles, vec!["theme", "fonts"]);
        assert!(preload.custom_urls.is_empty());
    }

    #[test]
    fn test_get_settings_missing_is_empty() {
        let store = MemoryStore::new();
        assert!(get_settings(&store).is_empty());
    }

    #[test]
    fn test_save_settings_sanitizes_and_clears_cache() {
        let store = MemoryStore::new();
        let transients = MemoryTransients::new();
        transients.set("defer_styles_abc", vec!["x".into()], None);

        let hooks = crate::features::register_all().unwrap();
        let input = record(json!({
            "defer_stylesheets_enabled": true,
            "defer_stylesheets_blocking_handles": "theme-style\nnot valid",
        }));
        let saved = save_settings(&store, &hooks, &transients, &input).unwrap();

        assert_eq!(saved["defer_stylesheets_enabled"], json!(1));
        assert_eq!(get_settings(&store), saved);
        assert!(transients.get("defer_styles_abc").is_none());

        let settings = Settings::load(&store);
        assert_eq!(settings.defer_styles.get().unwrap(), &vec!["theme-style".to_string()]);
    }
}
