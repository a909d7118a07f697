//! Hook registration table and dispatch.

use thiserror::Error;

use super::{Callback, Event, Priority, Shape, StyleTag};
use crate::cache::Transients;
use crate::debug;
use crate::host::Request;

/// Hook registration errors.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("`{name}` is a {found} callback, but `{event}` dispatches to {expected} callbacks")]
    ShapeMismatch {
        name: &'static str,
        event: Event,
        expected: Shape,
        found: Shape,
    },
}

/// One row of the table.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub event: Event,
    pub priority: Priority,
    pub name: &'static str,
    pub callback: Callback,
}

/// The (event, priority, handler) table.
#[derive(Debug, Default)]
pub struct HookTable {
    rows: Vec<Registration>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `callback` to `event`.
    pub fn add(
        &mut self,
        event: Event,
        priority: Priority,
        name: &'static str,
        callback: Callback,
    ) -> Result<&mut Self, HookError> {
        if callback.shape() != event.shape() {
            return Err(HookError::ShapeMismatch {
                name,
                event,
                expected: event.shape(),
                found: callback.shape(),
            });
        }
        self.rows.push(Registration {
            event,
            priority,
            name,
            callback,
        });
        Ok(self)
    }

    /// All rows in registration order.
    #[cfg(test)]
    pub fn rows(&self) -> &[Registration] {
        &self.rows
    }

    /// Rows for `event` in dispatch order: ascending priority, then
    /// registration order.
    pub fn subscribers(&self, event: Event) -> Vec<&Registration> {
        let mut rows: Vec<_> = self.rows.iter().filter(|r| r.event == event).collect();
        // stable: ties keep registration order
        rows.sort_by_key(|r| r.priority);
        rows
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Run every action subscribed to `event`.
    pub fn run_actions(&self, event: Event, req: &mut Request<'_>) {
        for row in self.subscribers(event) {
            if let Callback::Action(f) = row.callback {
                debug!("hook"; "{} @{} -> {}", event, row.priority, row.name);
                f(req);
            }
        }
    }

    /// Collect the output of every output callback subscribed to `event`.
    pub fn render_output(&self, event: Event, req: &Request<'_>) -> String {
        let mut out = String::new();
        for row in self.subscribers(event) {
            if let Callback::Output(f) = row.callback {
                debug!("hook"; "{} @{} -> {}", event, row.priority, row.name);
                f(req, &mut out);
            }
        }
        out
    }

    /// Pass a tag through every tag filter subscribed to `event`.
    pub fn apply_tag_filters(
        &self,
        event: Event,
        req: &Request<'_>,
        tag: String,
        style: &StyleTag,
    ) -> String {
        self.subscribers(event)
            .into_iter()
            .fold(tag, |tag, row| match row.callback {
                Callback::TagFilter(f) => f(req, tag, style),
                _ => tag,
            })
    }

    /// Pass a flag through every flag filter subscribed to `event`.
    pub fn apply_flag_filters(&self, event: Event, req: &Request<'_>, value: bool) -> bool {
        self.subscribers(event)
            .into_iter()
            .fold(value, |value, row| match row.callback {
                Callback::FlagFilter(f) => f(req, value),
                _ => value,
            })
    }

    /// Fire a lifecycle event.
    pub fn fire(&self, event: Event, transients: &dyn Transients) {
        for row in self.subscribers(event) {
            if let Callback::Lifecycle(f) = row.callback {
                debug!("hook"; "{} @{} -> {}", event, row.priority, row.name);
                f(transients);
            }
        }
    }
}
