//! Purge cached lists when plugins, themes or settings change.

use crate::cache::{self, Transients};
use crate::{debug, log};

/// Lifecycle callback around [`cache::clear_transients`].
pub fn clear_transients(transients: &dyn Transients) {
    match cache::clear_transients(transients) {
        Ok(removed) => debug!("cache"; "cleared {} transient(s)", removed),
        Err(e) => log!("error"; "failed to clear transients: {}", e),
    }
}
