//! ci-env - Detect the CI platform a build runs on and normalize its metadata.
//!
//! Every supported CI system exposes repository, branch, commit and pull
//! request details through its own environment variables. This crate maps
//! them onto one [`Platform`] interface and picks the active platform with a
//! fixed-priority [`PlatformRegistry`].
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.ci-env.yml` loading for the generic platform
//! - [`env`] - Injectable environment and file access
//! - [`error`] - Error types and result aliases
//! - [`info`] - Serializable platform snapshots
//! - [`platform`] - The platform trait and built-in adapters
//! - [`registry`] - Platform registration and detection
//! - [`template`] - `${VAR}` rendering for the generic platform
//!
//! # Example
//!
//! ```
//! use ci_env::{Env, PlatformInfo, PlatformRegistry};
//!
//! let env = Env::from_vars([
//!     ("DRONE", "true"),
//!     ("DRONE_REPO_OWNER", "acme"),
//!     ("DRONE_PULL_REQUEST", "7"),
//! ]);
//! let platform = PlatformRegistry::with_builtins().detect(&env).unwrap();
//! let info = PlatformInfo::collect(platform.as_ref()).unwrap();
//! assert_eq!(info.id, "drone");
//! assert_eq!(info.repo_owner, "acme");
//! assert_eq!(info.pr_number, 7);
//! ```

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod info;
pub mod platform;
pub mod registry;
pub mod template;

pub use env::Env;
pub use error::{CiEnvError, Result};
pub use info::{OutputFormat, PlatformInfo};
pub use platform::Platform;
pub use registry::{detect, PlatformRegistry};
