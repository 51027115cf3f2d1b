//! Atlantis adapter.
//!
//! Atlantis only ever runs terraform for a pull request, so every build is
//! reported as a PR.

use super::{parse_pr_number, Platform};
use crate::env::Env;
use crate::error::Result;

/// Registry identifier.
pub const ID: &str = "atlantis";

/// Atlantis platform.
#[derive(Debug, Clone)]
pub struct Atlantis {
    env: Env,
}

impl Atlantis {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Platform for Atlantis {
    fn id(&self) -> String {
        ID.to_string()
    }

    fn matches(&self) -> bool {
        self.env.is_set("ATLANTIS_TERRAFORM_VERSION")
    }

    fn repo_owner(&self) -> String {
        self.env.var("BASE_REPO_OWNER")
    }

    fn repo_name(&self) -> String {
        self.env.var("BASE_REPO_NAME")
    }

    fn branch(&self) -> String {
        self.env.var("HEAD_BRANCH_NAME")
    }

    fn sha(&self) -> String {
        self.env.var("HEAD_COMMIT")
    }

    fn tag(&self) -> String {
        String::new()
    }

    fn git_ref(&self) -> String {
        format!("refs/heads/{}", self.env.var("HEAD_BRANCH_NAME"))
    }

    fn is_pr(&self) -> bool {
        true
    }

    fn pr_number(&self) -> Result<u64> {
        parse_pr_number("PULL_NUM", &self.env.var("PULL_NUM"))
    }

    fn pr_base_branch(&self) -> String {
        self.env.var("BASE_BRANCH_NAME")
    }

    fn job_url(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CiEnvError;
    use crate::platform::test_support::env;

    #[test]
    fn matches_when_terraform_version_set() {
        assert!(Atlantis::new(env(&[("ATLANTIS_TERRAFORM_VERSION", "1.5.7")])).matches());
        assert!(!Atlantis::new(env(&[])).matches());
    }

    #[test]
    fn fields_from_environment() {
        let atlantis = Atlantis::new(env(&[
            ("BASE_REPO_OWNER", "acme"),
            ("BASE_REPO_NAME", "infra"),
            ("HEAD_COMMIT", "abc123"),
            ("HEAD_BRANCH_NAME", "feature"),
            ("BASE_BRANCH_NAME", "main"),
        ]));
        assert_eq!(atlantis.repo_owner(), "acme");
        assert_eq!(atlantis.repo_name(), "infra");
        assert_eq!(atlantis.sha(), "abc123");
        assert_eq!(atlantis.branch(), "feature");
        assert_eq!(atlantis.git_ref(), "refs/heads/feature");
        assert_eq!(atlantis.pr_base_branch(), "main");
        assert_eq!(atlantis.tag(), "");
        assert_eq!(atlantis.job_url(), "");
    }

    #[test]
    fn always_a_pull_request() {
        assert!(Atlantis::new(env(&[])).is_pr());
    }

    #[test]
    fn pr_number_from_pull_num() {
        let atlantis = Atlantis::new(env(&[("PULL_NUM", "21")]));
        assert_eq!(atlantis.pr_number().unwrap(), 21);
    }

    #[test]
    fn pr_number_zero_when_unset() {
        assert_eq!(Atlantis::new(env(&[])).pr_number().unwrap(), 0);
    }

    #[test]
    fn pr_number_non_numeric() {
        let atlantis = Atlantis::new(env(&[("PULL_NUM", "x21")]));
        assert!(matches!(
            atlantis.pr_number(),
            Err(CiEnvError::MalformedNumber { .. })
        ));
    }
}
