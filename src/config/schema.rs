//! Configuration schema.
//!
//! ```yaml
//! generic:
//!   id: [woodpecker]
//!   match: ["${CI_SYSTEM_NAME}"]
//!   repo_owner: ["${CI_REPO_OWNER}"]
//!   repo_name: ["${CI_REPO_NAME}"]
//!   branch: ["${CI_COMMIT_SOURCE_BRANCH}", "${CI_COMMIT_BRANCH}"]
//!   pr_number: ["${CI_COMMIT_PULL_REQUEST}"]
//! ```

use serde::{Deserialize, Serialize};

/// Root of a ci-env config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CiEnvConfig {
    /// Template-driven platform for CI systems without a built-in adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic: Option<GenericConfig>,
}

/// Templates for each field of the generic platform.
///
/// Every field is an ordered list of templates; an absent list renders as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenericConfig {
    pub id: Vec<String>,
    #[serde(rename = "match")]
    pub match_: Vec<String>,
    pub repo_owner: Vec<String>,
    pub repo_name: Vec<String>,
    pub branch: Vec<String>,
    pub sha: Vec<String>,
    pub tag: Vec<String>,
    #[serde(rename = "ref")]
    pub git_ref: Vec<String>,
    /// Falls back to `pr_number` when empty.
    pub is_pr: Vec<String>,
    pub pr_number: Vec<String>,
    pub pr_base_branch: Vec<String>,
    pub job_url: Vec<String>,
}
