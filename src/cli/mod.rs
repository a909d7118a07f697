//! Command-line interface module.
//!
//! | Command      | Handler                  |
//! |--------------|--------------------------|
//! | `render`     | [`render::render`]       |
//! | `save`       | [`save::save`]           |
//! | `show`       | [`show::show`]           |
//! | `hooks`      | [`hooks::print_hooks`]   |
//! | `invalidate` | [`invalidate::invalidate`] |

mod args;
pub mod hooks;
pub mod invalidate;
pub mod render;
pub mod save;
pub mod show;

pub use args::{Cli, Commands};

use crate::cache::FileTransients;
use crate::config::Config;
use crate::settings::JsonFileStore;

/// Option store configured in `[store]`.
pub fn open_store(config: &Config) -> JsonFileStore {
    JsonFileStore::new(&config.store.path)
}

/// Transient cache configured in `[cache]`.
pub fn open_transients(config: &Config) -> FileTransients {
    FileTransients::new(&config.cache.dir)
}
