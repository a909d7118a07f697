//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Critical-path asset tuning: dequeue, defer and preload front-end assets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: critpath.toml)
    #[arg(short = 'C', long, global = true, default_value = "critpath.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run one request and print the resulting <head> asset markup
    #[command(visible_alias = "r")]
    Render {
        /// Asset manifest (TOML) describing registered and enqueued assets
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        assets: PathBuf,

        /// The administrative toolbar is visible
        #[arg(long)]
        admin_bar: bool,

        /// Render as an administrative screen
        #[arg(long)]
        admin: bool,

        /// The host lacks script loading strategy support
        #[arg(long)]
        no_strategy: bool,

        /// Use a throwaway in-memory cache instead of the cache directory
        #[arg(long)]
        no_cache: bool,
    },

    /// Sanitize a settings file (TOML or JSON) and store it
    #[command(visible_alias = "s")]
    Save {
        /// Settings file; `.json` is read as JSON, anything else as TOML
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Print the sanitized record as JSON instead of storing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print the stored settings grouped by section
    Show {
        /// Only this section (e.g. `preload-assets`), with descriptions
        section: Option<String>,
    },

    /// Print the hook registration table
    Hooks,

    /// Fire a lifecycle event (clears cached lists)
    Invalidate {
        /// plugin-activated, plugin-deactivated, theme-switched or upgrade-complete
        event: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_and_verbose_flags_coexist() {
        let cli = Cli::parse_from(["critpath", "-v", "show"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Show { section: None }));
        let err = Cli::try_parse_from(["critpath", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::parse_from(["critpath", "render", "--assets", "a.toml", "--admin-bar", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("critpath.toml"));
        let Commands::Render {
            assets,
            admin_bar,
            admin,
            no_strategy,
            no_cache,
        } = cli.command
        else {
            panic!("expected render");
        };
        assert_eq!(assets, PathBuf::from("a.toml"));
        assert!(admin_bar);
        assert!(!admin && !no_strategy && !no_cache);
    }

    #[test]
    fn test_parse_invalidate_with_config() {
        let cli = Cli::parse_from(["critpath", "-C", "site.toml", "invalidate", "theme-switched"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(matches!(cli.command, Commands::Invalidate { ref event } if event == "theme-switched"));
    }
}
