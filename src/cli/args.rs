//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// ci-env - Detect the CI platform and print normalized build metadata.
#[derive(Debug, Parser)]
#[command(name = "ci-env")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (json or export)
    #[arg(short, long, global = true, default_value = "json")]
    pub format: String,

    /// Path to config file (overrides default ./.ci-env.yml)
    #[arg(short, long, global = true, env = "CI_ENV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use this platform instead of detecting one
    #[arg(short, long, global = true)]
    pub platform: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the detected platform's metadata (default if no command specified)
    Show,

    /// List known platforms in detection order
    Platforms,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_no_args() {
        let cli = Cli::parse_from(["ci-env"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.format, "json");
        assert!(cli.platform.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn cli_parses_format() {
        let cli = Cli::parse_from(["ci-env", "--format", "export"]);
        assert_eq!(cli.format, "export");
    }

    #[test]
    fn cli_accepts_empty_format() {
        let cli = Cli::parse_from(["ci-env", "--format", ""]);
        assert_eq!(cli.format, "");
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ci-env", "show", "--platform", "drone", "--debug"]);
        assert!(matches!(cli.command, Some(Commands::Show)));
        assert_eq!(cli.platform.as_deref(), Some("drone"));
        assert!(cli.debug);
    }

    #[test]
    fn cli_parses_config_path() {
        let cli = Cli::parse_from(["ci-env", "--config", "ci.yml", "platforms"]);
        assert_eq!(cli.config, Some(PathBuf::from("ci.yml")));
        assert!(matches!(cli.command, Some(Commands::Platforms)));
    }

    #[test]
    fn cli_parses_completions() {
        let cli = Cli::parse_from(["ci-env", "completions", "bash"]);
        match cli.command {
            Some(Commands::Completions(args)) => assert_eq!(args.shell, Shell::Bash),
            other => panic!("Expected Completions command, got {:?}", other),
        }
    }
}
