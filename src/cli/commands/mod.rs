//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command writes to a caller
//! supplied sink, so tests capture output without touching stdout.

pub mod completions;
pub mod dispatcher;
pub mod platforms;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
