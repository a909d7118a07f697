//! critpath - critical-path asset tuning for a content site.
//!
//! Dequeues unused stylesheets and scripts, defers non-critical ones and
//! emits preload hints, all driven by one stored settings record.

mod cache;
mod cli;
mod config;
mod features;
mod hooks;
mod host;
mod logger;
mod settings;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli)?;
    debug!("config"; "root: {}", config.get_root().display());

    match &cli.command {
        Commands::Render {
            assets, no_cache, ..
        } => cli::render::render(&config, assets, *no_cache),
        Commands::Save { input, dry_run } => cli::save::save(&config, input, *dry_run),
        Commands::Show { section } => cli::show::show(&config, section.as_deref()),
        Commands::Hooks => cli::hooks::print_hooks(),
        Commands::Invalidate { event } => cli::invalidate::invalidate(&config, event),
    }
}
