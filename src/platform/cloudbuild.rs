//! Google Cloud Build adapter.
//!
//! Reads the default substitutions Cloud Build exports for triggered builds
//! (`REPO_NAME`, `BRANCH_NAME`, `_PR_NUMBER`, ...).

use super::{github_repo_from_url, parse_pr_number, Platform};
use crate::env::Env;
use crate::error::Result;

/// Registry identifier.
pub const ID: &str = "cloudbuild";

const CONSOLE_BUILDS_URL: &str = "https://console.cloud.google.com/cloud-build/builds";

/// Google Cloud Build platform.
#[derive(Debug, Clone)]
pub struct CloudBuild {
    env: Env,
}

impl CloudBuild {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Platform for CloudBuild {
    fn id(&self) -> String {
        ID.to_string()
    }

    fn matches(&self) -> bool {
        self.env.is_set("PROJECT_NUMBER")
    }

    fn repo_owner(&self) -> String {
        github_repo_from_url(&self.env.var("_HEAD_REPO_URL"))
            .map(|(owner, _)| owner)
            .unwrap_or_default()
    }

    fn repo_name(&self) -> String {
        self.env.var("REPO_NAME")
    }

    fn branch(&self) -> String {
        self.env.var("BRANCH_NAME")
    }

    fn sha(&self) -> String {
        self.env.var("COMMIT_SHA")
    }

    fn tag(&self) -> String {
        self.env.var("TAG_NAME")
    }

    fn git_ref(&self) -> String {
        String::new()
    }

    fn is_pr(&self) -> bool {
        self.env.is_set("_HEAD_REPO_URL")
    }

    fn pr_number(&self) -> Result<u64> {
        parse_pr_number("_PR_NUMBER", &self.env.var("_PR_NUMBER"))
    }

    fn pr_base_branch(&self) -> String {
        self.env.var("_BASE_BRANCH")
    }

    fn job_url(&self) -> String {
        let build_id = self.env.var("BUILD_ID");
        let project_id = self.env.var("PROJECT_ID");
        if build_id.is_empty() || project_id.is_empty() {
            return String::new();
        }
        let location = self.env.var("LOCATION");
        if location.is_empty() {
            format!("{}/{}?project={}", CONSOLE_BUILDS_URL, build_id, project_id)
        } else {
            format!(
                "{};region={}/{}?project={}",
                CONSOLE_BUILDS_URL, location, build_id, project_id
            )
        }
    }
}
