//! Configuration file discovery and loading.

use crate::config::schema::CiEnvConfig;
use crate::error::{CiEnvError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".ci-env.yml";

/// Find `.ci-env.yml` in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(DEFAULT_CONFIG_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<CiEnvConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CiEnvError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CiEnvError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into CiEnvConfig.
///
/// An empty document is an empty config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<CiEnvConfig> {
    if content.trim().is_empty() {
        return Ok(CiEnvConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| CiEnvError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, `.ci-env.yml` in `dir` is used
/// when present, and an empty config otherwise.
pub fn load_config(dir: &Path, config_override: Option<&Path>) -> Result<CiEnvConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }
    match find_config(dir) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(CiEnvConfig::default()),
    }
}
