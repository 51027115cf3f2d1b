//! The `ci-env show` command (also the default).
//!
//! Detects the platform (or builds the one named by `--platform`) and
//! prints its [`PlatformInfo`] as JSON or `export` lines.

use std::io::Write;

use clap::CommandFactory;
use tracing::debug;

use super::dispatcher::{Command, CommandResult};
use crate::cli::args::Cli;
use crate::env::Env;
use crate::error::{CiEnvError, Result};
use crate::info::{OutputFormat, PlatformInfo};
use crate::platform::Platform;
use crate::registry::PlatformRegistry;

/// The show command implementation.
pub struct ShowCommand {
    registry: PlatformRegistry,
    env: Env,
    format: String,
    platform: Option<String>,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(
        registry: PlatformRegistry,
        env: Env,
        format: String,
        platform: Option<String>,
    ) -> Self {
        Self {
            registry,
            env,
            format,
            platform,
        }
    }

    fn platform(&self) -> Result<Box<dyn Platform>> {
        match &self.platform {
            Some(id) => self
                .registry
                .get(id, &self.env)
                .ok_or_else(|| CiEnvError::UnknownPlatform { id: id.clone() }),
            None => self.registry.detect(&self.env).ok_or(CiEnvError::NoMatch),
        }
    }
}

impl Command for ShowCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        if self.format.is_empty() {
            writeln!(out, "{}", Cli::command().render_help())?;
            return Ok(CommandResult::success());
        }
        let format: OutputFormat = self.format.parse()?;

        let platform = self.platform()?;
        debug!(platform = %platform.id(), %format, "collecting platform info");
        let info = PlatformInfo::collect(platform.as_ref())?;

        let rendered = info.render(format)?;
        match format {
            OutputFormat::Json => writeln!(out, "{}", rendered)?,
            OutputFormat::Export => write!(out, "{}", rendered)?,
        }
        Ok(CommandResult::success())
    }
}
