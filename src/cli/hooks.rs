//! `critpath hooks`: print the hook registration table.

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::features;
use crate::hooks::{Event, HookTable};

pub fn print_hooks() -> Result<()> {
    let hooks = features::register_all().context("failed to register hooks")?;
    print!("{}", format_table(&hooks));
    Ok(())
}

/// Rows grouped by event, in dispatch order.
fn format_table(hooks: &HookTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24} {:>8}  {:<12} HANDLER", "EVENT", "PRIORITY", "SHAPE");
    for event in Event::ALL {
        for row in hooks.subscribers(event) {
            let _ = writeln!(
                out,
                "{:<24} {:>8}  {:<12} {}",
                event.name(),
                row.priority.to_string(),
                row.callback.shape().to_string(),
                row.name
            );
        }
    }
    out
}
