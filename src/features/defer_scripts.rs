//! Mark non-essential scripts for deferred loading.

use crate::host::{Request, STRATEGY};

const DEFER: &str = "defer";

/// Set `strategy = defer` on every registered script with a source that is
/// not in the blocking allow-list.
///
/// Front end only, and only when the host supports loading strategies and
/// the admin toolbar is hidden.
pub fn defer_scripts(req: &mut Request<'_>) {
    if !req.is_frontend() || !req.flags.strategy || req.flags.admin_bar {
        return;
    }
    let Some(blocking) = req.settings.defer_scripts.get() else {
        return;
    };

    for script in req.registry.scripts.iter_mut() {
        if script.src.is_empty() || blocking.contains(&script.handle) {
            continue;
        }
        script.extra.insert(STRATEGY.to_string(), DEFER.to_string());
    }
}
