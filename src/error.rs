//! Error types for ci-env operations.
//!
//! This module defines [`CiEnvError`], the error type returned by every
//! fallible operation in the crate, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - "Not a pull request" and "value not provided" are never errors; they
//!   come back as `0` or an empty string.
//! - A value that is present but malformed is always surfaced, never
//!   defaulted.
//! - Errors raised by user-supplied template renderers travel through
//!   `CiEnvError::Other` (`anyhow::Error`).

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ci-env operations.
#[derive(Debug, Error)]
pub enum CiEnvError {
    /// No registered platform matched the environment.
    #[error("no CI platform matched the current environment")]
    NoMatch,

    /// A pull request number was present but is not an integer.
    #[error("{var} is not a valid pull request number ({value:?}): {source}")]
    MalformedNumber {
        var: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A value that encodes a pull request does not have the expected shape.
    #[error("{var} has an unexpected format: {value:?}")]
    MalformedRef { var: String, value: String },

    /// The GitHub Actions event payload could not be opened.
    #[error("failed to open event payload {path}: {source}")]
    EventFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The GitHub Actions event payload is not valid JSON.
    #[error("failed to parse a GitHub Actions {payload} payload: {source}")]
    Decode {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A generic platform template could not be rendered.
    #[error("failed to render template {template:?}: {message}")]
    Render { template: String, message: String },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Output format other than `json` or `export`.
    #[error("unknown format {0}")]
    UnknownFormat(String),

    /// No platform is registered under the requested id.
    #[error("unknown platform: {id}")]
    UnknownPlatform { id: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ci-env operations.
pub type Result<T> = std::result::Result<T, CiEnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_number_displays_var_and_value() {
        let source = "hello".parse::<u64>().unwrap_err();
        let err = CiEnvError::MalformedNumber {
            var: "CODEBUILD_SOURCE_VERSION".into(),
            value: "pr/hello".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("CODEBUILD_SOURCE_VERSION"));
        assert!(msg.contains("pr/hello"));
    }

    #[test]
    fn malformed_ref_displays_value() {
        let err = CiEnvError::MalformedRef {
            var: "GITHUB_REF_NAME".into(),
            value: "gh-readonly-queue/main".into(),
        };
        assert!(err.to_string().contains("gh-readonly-queue/main"));
    }

    #[test]
    fn event_file_displays_path() {
        let err = CiEnvError::EventFile {
            path: PathBuf::from("/github/workflow/event.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/github/workflow/event.json"));
    }

    #[test]
    fn decode_names_payload_shape() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CiEnvError::Decode {
            payload: "issue",
            source,
        };
        assert!(err.to_string().contains("issue payload"));
    }

    #[test]
    fn unknown_format_displays_format() {
        let err = CiEnvError::UnknownFormat("yaml".into());
        assert_eq!(err.to_string(), "unknown format yaml");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: CiEnvError = io_err.into();
        assert!(matches!(err, CiEnvError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: CiEnvError = anyhow::anyhow!("template exploded").into();
        assert_eq!(err.to_string(), "template exploded");
    }
}
