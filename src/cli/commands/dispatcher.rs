//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::load_config;
use crate::env::Env;
use crate::error::Result;
use crate::registry::PlatformRegistry;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing its output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
///
/// Failures travel as errors, so a completed command always exits 0.
#[derive(Debug)]
pub struct CommandResult {
    /// Process exit code.
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
    env: Env,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory and
    /// environment.
    pub fn new(working_dir: PathBuf, env: Env) -> Self {
        Self { working_dir, env }
    }

    /// Get the working directory path.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Built-in platforms plus the configured generic platform, if any.
    pub fn registry(&self, cli: &Cli) -> Result<PlatformRegistry> {
        let config = load_config(&self.working_dir, cli.config.as_deref())?;
        let registry = PlatformRegistry::with_builtins();
        Ok(match config.generic {
            Some(generic) => registry.with_generic(generic),
            None => registry,
        })
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Show) | None => {
                // Printing usage must not depend on a readable config.
                let registry = if cli.format.is_empty() {
                    PlatformRegistry::new()
                } else {
                    self.registry(cli)?
                };
                let cmd = super::show::ShowCommand::new(
                    registry,
                    self.env.clone(),
                    cli.format.clone(),
                    cli.platform.clone(),
                );
                cmd.execute(out)
            }
            Some(Commands::Platforms) => {
                let cmd = super::platforms::PlatformsCommand::new(
                    self.registry(cli)?,
                    self.env.clone(),
                );
                cmd.execute(out)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(out)
            }
        }
    }
}
