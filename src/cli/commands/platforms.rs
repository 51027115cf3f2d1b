//! The `ci-env platforms` command.
//!
//! Lists registered platforms in detection order and marks the one that
//! matches the current environment.

use std::io::Write;

use super::dispatcher::{Command, CommandResult};
use crate::env::Env;
use crate::error::Result;
use crate::registry::PlatformRegistry;

/// The platforms command implementation.
pub struct PlatformsCommand {
    registry: PlatformRegistry,
    env: Env,
}

impl PlatformsCommand {
    /// Create a new platforms command.
    pub fn new(registry: PlatformRegistry, env: Env) -> Self {
        Self { registry, env }
    }
}

impl Command for PlatformsCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let mut detected = false;
        for id in self.registry.ids() {
            let matched = !detected
                && self
                    .registry
                    .get(id, &self.env)
                    .is_some_and(|p| p.matches());
            if matched {
                detected = true;
                writeln!(out, "* {}", id)?;
            } else {
                writeln!(out, "  {}", id)?;
            }
        }
        Ok(CommandResult::success())
    }
}
