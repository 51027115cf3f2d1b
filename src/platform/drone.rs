//! Drone CI adapter.

use super::{parse_pr_number, Platform};
use crate::env::Env;
use crate::error::Result;

/// Registry identifier.
pub const ID: &str = "drone";

/// Drone CI platform.
#[derive(Debug, Clone)]
pub struct Drone {
    env: Env,
}

impl Drone {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Platform for Drone {
    fn id(&self) -> String {
        ID.to_string()
    }

    fn matches(&self) -> bool {
        self.env.is_set("DRONE")
    }

    fn repo_owner(&self) -> String {
        self.env.var("DRONE_REPO_OWNER")
    }

    fn repo_name(&self) -> String {
        self.env.var("DRONE_REPO_NAME")
    }

    fn branch(&self) -> String {
        self.env.var("DRONE_SOURCE_BRANCH")
    }

    fn sha(&self) -> String {
        self.env.var("DRONE_COMMIT_SHA")
    }

    fn tag(&self) -> String {
        self.env.var("DRONE_TAG")
    }

    fn git_ref(&self) -> String {
        self.env.var("DRONE_COMMIT_REF")
    }

    fn is_pr(&self) -> bool {
        self.env.is_set("DRONE_PULL_REQUEST")
    }

    fn pr_number(&self) -> Result<u64> {
        parse_pr_number("DRONE_PULL_REQUEST", &self.env.var("DRONE_PULL_REQUEST"))
    }

    fn pr_base_branch(&self) -> String {
        self.env.var("DRONE_TARGET_BRANCH")
    }

    /// Empty unless the build link, stage and step are all known.
    fn job_url(&self) -> String {
        let link = self.env.var("DRONE_BUILD_LINK");
        let stage = self.env.var("DRONE_STAGE_NUMBER");
        let step = self.env.var("DRONE_STEP_NUMBER");
        if link.is_empty() || stage.is_empty() || step.is_empty() {
            return String::new();
        }
        format!("{}/{}/{}", link, stage, step)
    }
}
