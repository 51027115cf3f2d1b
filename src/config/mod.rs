//! Configuration loading for ci-env.
//!
//! The only configurable part of ci-env is the [generic platform], described
//! by a `generic:` section of templates:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use ci_env::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".ci-env.yml"), "generic:\n  match: [\"${MY_CI}\"]\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(config.generic.is_some());
//! ```
//!
//! [generic platform]: crate::platform::Generic

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, DEFAULT_CONFIG_FILE};
pub use schema::{CiEnvConfig, GenericConfig};
