//! Lifecycle hooks: named events, priorities and typed callbacks.
//!
//! Every component subscribes to one event through a [`HookTable`] built at
//! startup. An event fixes the callback shape it accepts, so an action can't
//! be registered as a tag filter by mistake:
//!
//! | Event                  | Shape        | Callback                                   |
//! |------------------------|--------------|--------------------------------------------|
//! | `Head`                 | `Output`     | `fn(&Request, &mut String)`                |
//! | `EnqueueScripts`       | `Action`     | `fn(&mut Request)`                         |
//! | `StyleLoaderTag`       | `TagFilter`  | `fn(&Request, String, &StyleTag) -> String`|
//! | `SeparateBlockAssets`  | `FlagFilter` | `fn(&Request, bool) -> bool`               |
//! | plugin/theme/settings  | `Lifecycle`  | `fn(&dyn Transients)`                      |

mod table;

use std::fmt;

pub use table::{HookError, HookTable};

use crate::cache::Transients;
use crate::host::Request;

// ============================================================================
// Priority
// ============================================================================

/// Dispatch priority. Lower runs first; equal priorities run in
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

impl Priority {
    /// Actions that need to run very early.
    pub const EARLY: Priority = Priority(1);
    /// Host default.
    pub const DEFAULT: Priority = Priority(10);
    /// Cleanup and late modifications.
    pub const LATE: Priority = Priority(100);
    /// Final modifications.
    pub const VERY_LATE: Priority = Priority(999);
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Event
// ============================================================================

/// Named moments of the host render lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Document `<head>` output.
    Head,
    /// Asset registration and enqueueing.
    EnqueueScripts,
    /// One emitted stylesheet `<link>` tag.
    StyleLoaderTag,
    /// Whether block assets load separately (only when the block is used).
    SeparateBlockAssets,
    PluginActivated,
    PluginDeactivated,
    ThemeSwitched,
    UpgradeComplete,
    SettingsSaved,
}

impl Event {
    pub const ALL: [Event; 9] = [
        Event::Head,
        Event::EnqueueScripts,
        Event::StyleLoaderTag,
        Event::SeparateBlockAssets,
        Event::PluginActivated,
        Event::PluginDeactivated,
        Event::ThemeSwitched,
        Event::UpgradeComplete,
        Event::SettingsSaved,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Event::Head => "head",
            Event::EnqueueScripts => "enqueue-scripts",
            Event::StyleLoaderTag => "style-loader-tag",
            Event::SeparateBlockAssets => "separate-block-assets",
            Event::PluginActivated => "plugin-activated",
            Event::PluginDeactivated => "plugin-deactivated",
            Event::ThemeSwitched => "theme-switched",
            Event::UpgradeComplete => "upgrade-complete",
            Event::SettingsSaved => "settings-saved",
        }
    }

    pub fn from_name(name: &str) -> Option<Event> {
        Event::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Callback shape this event dispatches to.
    pub const fn shape(self) -> Shape {
        match self {
            Event::Head => Shape::Output,
            Event::EnqueueScripts => Shape::Action,
            Event::StyleLoaderTag => Shape::TagFilter,
            Event::SeparateBlockAssets => Shape::FlagFilter,
            Event::PluginActivated
            | Event::PluginDeactivated
            | Event::ThemeSwitched
            | Event::UpgradeComplete
            | Event::SettingsSaved => Shape::Lifecycle,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Callbacks
// ============================================================================

/// Payload/return contract of a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Action,
    Output,
    TagFilter,
    FlagFilter,
    Lifecycle,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Action => "action",
            Shape::Output => "output",
            Shape::TagFilter => "tag filter",
            Shape::FlagFilter => "flag filter",
            Shape::Lifecycle => "lifecycle",
        })
    }
}

/// Structured data accompanying a stylesheet tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTag {
    pub handle: String,
    pub href: String,
    pub media: String,
}

pub type ActionFn = fn(&mut Request<'_>);
pub type OutputFn = fn(&Request<'_>, &mut String);
pub type TagFilterFn = fn(&Request<'_>, String, &StyleTag) -> String;
pub type FlagFilterFn = fn(&Request<'_>, bool) -> bool;
pub type LifecycleFn = fn(&dyn Transients);

/// A subscribed callback.
#[derive(Clone, Copy)]
pub enum Callback {
    Action(ActionFn),
    Output(OutputFn),
    TagFilter(TagFilterFn),
    FlagFilter(FlagFilterFn),
    Lifecycle(LifecycleFn),
}

impl Callback {
    pub const fn shape(&self) -> Shape {
        match self {
            Callback::Action(_) => Shape::Action,
            Callback::Output(_) => Shape::Output,
            Callback::TagFilter(_) => Shape::TagFilter,
            Callback::FlagFilter(_) => Shape::FlagFilter,
            Callback::Lifecycle(_) => Shape::Lifecycle,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({})", self.shape())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(Priority::EARLY < Priority::DEFAULT);
        assert!(Priority::DEFAULT < Priority::LATE);
        assert!(Priority::LATE < Priority::VERY_LATE);
    }

    #[test]
    fn test_event_names_round_trip() {
        for event in Event::ALL {
            assert_eq!(Event::from_name(event.name()), Some(event));
        }
        assert_eq!(Event::from_name("nope"), None);
    }
}
