//! CI platform adapters.
//!
//! Each supported CI vendor implements the [`Platform`] trait against its own
//! environment variable schema. Adapters hold nothing but an [`Env`] (and,
//! for [`Generic`], its templates), so every accessor re-reads the
//! environment on each call.
//!
//! # Adapters
//!
//! - [`GitHubActions`] - `github-actions`
//! - [`CircleCi`] - `circleci`
//! - [`Drone`] - `drone`
//! - [`CodeBuild`] - `codebuild`
//! - [`Atlantis`] - `atlantis`
//! - [`CloudBuild`] - `cloudbuild`
//! - [`Generic`] - user-defined templates
//!
//! [`Env`]: crate::env::Env

pub mod atlantis;
pub mod circleci;
pub mod cloudbuild;
pub mod codebuild;
pub mod drone;
pub mod generic;
pub mod github_actions;

pub use atlantis::Atlantis;
pub use circleci::CircleCi;
pub use cloudbuild::CloudBuild;
pub use codebuild::CodeBuild;
pub use drone::Drone;
pub use generic::{Generic, GenericField};
pub use github_actions::GitHubActions;

use crate::error::{CiEnvError, Result};

const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";
const GITHUB_URL_PREFIX: &str = "https://github.com";

/// Normalized, read-only view of a CI platform's build metadata.
///
/// Every method is evaluated on demand against the injected environment.
/// Values the platform does not provide come back as `""`.
pub trait Platform: Send + Sync {
    /// Stable platform identifier, e.g. `"github-actions"`.
    fn id(&self) -> String;

    /// Whether the environment belongs to this platform.
    fn matches(&self) -> bool;

    /// Repository owner (user or organization).
    fn repo_owner(&self) -> String;

    /// Repository name without the owner.
    fn repo_name(&self) -> String;

    /// Branch being built.
    fn branch(&self) -> String;

    /// Commit being built.
    fn sha(&self) -> String;

    /// Tag being built; empty on branch builds.
    fn tag(&self) -> String;

    /// Full git ref, e.g. `refs/heads/main`.
    fn git_ref(&self) -> String;

    /// Whether the build was triggered by a pull/merge request.
    fn is_pr(&self) -> bool;

    /// Pull request number.
    ///
    /// Returns `Ok(0)` when the build is not a pull request. A present but
    /// malformed value is an error, never `0`.
    fn pr_number(&self) -> Result<u64>;

    /// Target branch of the pull request.
    fn pr_base_branch(&self) -> String;

    /// Browsable URL of the running job.
    fn job_url(&self) -> String;
}

/// Strip one leading `refs/heads/`. Inputs without the prefix pass through.
pub fn trim_heads(git_ref: &str) -> &str {
    git_ref.strip_prefix(HEADS_PREFIX).unwrap_or(git_ref)
}

/// Tag name from a `refs/tags/...` ref; empty for any other ref.
pub fn tag_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix(TAGS_PREFIX).unwrap_or("")
}

/// Parse a pull request number held in `var`.
///
/// Empty means "not a pull request" and yields `0`.
pub fn parse_pr_number(var: &str, value: &str) -> Result<u64> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|source| CiEnvError::MalformedNumber {
            var: var.to_string(),
            value: value.to_string(),
            source,
        })
}

/// Owner and name from a GitHub clone URL such as
/// `https://github.com/acme/widgets.git`.
///
/// Other hosts are not understood and yield `None`.
pub fn github_repo_from_url(url: &str) -> Option<(String, String)> {
    if !url.starts_with(GITHUB_URL_PREFIX) {
        return None;
    }
    let mut segments = url.rsplit('/');
    let name = segments.next()?;
    let owner = segments.next()?;
    let name = name.strip_suffix(".git").unwrap_or(name);
    Some((owner.to_string(), name.to_string()))
}
