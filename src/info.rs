//! Flat, serializable view of a detected platform.
//!
//! [`PlatformInfo`] is what the CLI prints, either as indented JSON or as
//! shell `export` statements.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CiEnvError, Result};
use crate::platform::Platform;

/// Output format for platform information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Export,
}

impl FromStr for OutputFormat {
    type Err = CiEnvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "export" => Ok(OutputFormat::Export),
            other => Err(CiEnvError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Export => write!(f, "export"),
        }
    }
}

/// Snapshot of every field a platform exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub id: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub branch: String,
    pub sha: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(rename = "ref", skip_serializing_if = "String::is_empty")]
    pub git_ref: String,
    pub is_pr: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub pr_number: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pr_base_branch: String,
    pub job_url: String,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl PlatformInfo {
    /// Read every field from `platform`.
    ///
    /// The pull request number is only resolved for pull request builds, so
    /// a push build never touches the GitHub Actions event payload.
    pub fn collect(platform: &dyn Platform) -> Result<Self> {
        let is_pr = platform.is_pr();
        let pr_number = if is_pr { platform.pr_number()? } else { 0 };
        Ok(Self {
            id: platform.id(),
            repo_owner: platform.repo_owner(),
            repo_name: platform.repo_name(),
            branch: platform.branch(),
            sha: platform.sha(),
            tag: platform.tag(),
            git_ref: platform.git_ref(),
            is_pr,
            pr_number,
            pr_base_branch: platform.pr_base_branch(),
            job_url: platform.job_url(),
        })
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CiEnvError::Other(e.into()))
    }

    /// One `export KEY=value` line per field.
    pub fn to_export(&self) -> String {
        let pr_number = self.pr_number.to_string();
        let is_pr = self.is_pr.to_string();
        let fields: [(&str, &str); 11] = [
            ("ID", self.id.as_str()),
            ("REPO_OWNER", self.repo_owner.as_str()),
            ("REPO_NAME", self.repo_name.as_str()),
            ("BRANCH", self.branch.as_str()),
            ("SHA", self.sha.as_str()),
            ("TAG", self.tag.as_str()),
            ("REF", self.git_ref.as_str()),
            ("IS_PR", is_pr.as_str()),
            ("PR_NUMBER", pr_number.as_str()),
            ("PR_BASE_BRANCH", self.pr_base_branch.as_str()),
            ("JOB_URL", self.job_url.as_str()),
        ];
        fields
            .iter()
            .map(|(key, value)| format!("export {}={}\n", key, value))
            .collect()
    }

    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.to_json(),
            OutputFormat::Export => Ok(self.to_export()),
        }
    }
}
