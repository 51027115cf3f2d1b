//! AWS CodeBuild adapter.

use super::{github_repo_from_url, parse_pr_number, trim_heads, Platform};
use crate::env::Env;
use crate::error::{CiEnvError, Result};

/// Registry identifier.
pub const ID: &str = "codebuild";

const PR_SOURCE_PREFIX: &str = "pr/";

/// AWS CodeBuild platform.
///
/// Repository coordinates are only derived for GitHub sources.
#[derive(Debug, Clone)]
pub struct CodeBuild {
    env: Env,
}

impl CodeBuild {
    pub fn new(env: Env) -> Self {
        Self { env }
    }

    fn repository(&self) -> (String, String) {
        github_repo_from_url(&self.env.var("CODEBUILD_SOURCE_REPO_URL")).unwrap_or_default()
    }
}

impl Platform for CodeBuild {
    fn id(&self) -> String {
        ID.to_string()
    }

    fn matches(&self) -> bool {
        self.env.is_set("CODEBUILD_BUILD_ID") || self.env.var("CODEBUILD_CI") == "true"
    }

    fn repo_owner(&self) -> String {
        self.repository().0
    }

    fn repo_name(&self) -> String {
        self.repository().1
    }

    fn branch(&self) -> String {
        trim_heads(&self.env.var("CODEBUILD_WEBHOOK_HEAD_REF")).to_string()
    }

    fn sha(&self) -> String {
        self.env.var("CODEBUILD_RESOLVED_SOURCE_VERSION")
    }

    fn tag(&self) -> String {
        String::new()
    }

    fn git_ref(&self) -> String {
        self.env.var("CODEBUILD_WEBHOOK_HEAD_REF")
    }

    fn is_pr(&self) -> bool {
        self.env
            .var("CODEBUILD_SOURCE_VERSION")
            .starts_with(PR_SOURCE_PREFIX)
    }

    fn pr_number(&self) -> Result<u64> {
        let version = self.env.var("CODEBUILD_SOURCE_VERSION");
        match version.strip_prefix(PR_SOURCE_PREFIX) {
            Some("") => Err(CiEnvError::MalformedRef {
                var: "CODEBUILD_SOURCE_VERSION".to_string(),
                value: version.clone(),
            }),
            Some(number) => parse_pr_number("CODEBUILD_SOURCE_VERSION", number),
            None => Ok(0),
        }
    }

    fn pr_base_branch(&self) -> String {
        trim_heads(&self.env.var("CODEBUILD_WEBHOOK_BASE_REF")).to_string()
    }

    fn job_url(&self) -> String {
        self.env.var("CODEBUILD_BUILD_URL")
    }
}
