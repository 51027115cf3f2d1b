//! CircleCI adapter.

use super::{parse_pr_number, Platform};
use crate::env::Env;
use crate::error::{CiEnvError, Result};

/// Registry identifier.
pub const ID: &str = "circleci";

/// CircleCI platform.
///
/// CircleCI exposes the pull request only as a URL in `CIRCLE_PULL_REQUEST`
/// (e.g. `https://github.com/acme/widgets/pull/42`); the number is its last
/// path segment.
#[derive(Debug, Clone)]
pub struct CircleCi {
    env: Env,
}

impl CircleCi {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Platform for CircleCi {
    fn id(&self) -> String {
        ID.to_string()
    }

    fn matches(&self) -> bool {
        self.env.is_set("CIRCLECI")
    }

    fn repo_owner(&self) -> String {
        self.env.var("CIRCLE_PROJECT_USERNAME")
    }

    fn repo_name(&self) -> String {
        self.env.var("CIRCLE_PROJECT_REPONAME")
    }

    fn branch(&self) -> String {
        self.env.var("CIRCLE_BRANCH")
    }

    fn sha(&self) -> String {
        self.env.var("CIRCLE_SHA1")
    }

    fn tag(&self) -> String {
        self.env.var("CIRCLE_TAG")
    }

    fn git_ref(&self) -> String {
        String::new()
    }

    fn is_pr(&self) -> bool {
        self.env.is_set("CIRCLE_PULL_REQUEST")
    }

    fn pr_number(&self) -> Result<u64> {
        let url = self.env.var("CIRCLE_PULL_REQUEST");
        if url.is_empty() {
            return Ok(0);
        }
        let (_, number) = url
            .rsplit_once('/')
            .ok_or_else(|| CiEnvError::MalformedRef {
                var: "CIRCLE_PULL_REQUEST".to_string(),
                value: url.clone(),
            })?;
        if number.is_empty() {
            // "https://.../pull/" would otherwise read as "not a PR"
            return Err(CiEnvError::MalformedRef {
                var: "CIRCLE_PULL_REQUEST".to_string(),
                value: url.clone(),
            });
        }
        parse_pr_number("CIRCLE_PULL_REQUEST", number)
    }

    fn pr_base_branch(&self) -> String {
        String::new()
    }

    fn job_url(&self) -> String {
        self.env.var("CIRCLE_BUILD_URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::test_support::env;

    #[test]
    fn matches_when_circleci_set() {
        assert!(CircleCi::new(env(&[("CIRCLECI", "true")])).matches());
        assert!(!CircleCi::new(env(&[])).matches());
    }

    #[test]
    fn fields_from_environment() {
        let cc = CircleCi::new(env(&[
            ("CIRCLE_PROJECT_USERNAME", "acme"),
            ("CIRCLE_PROJECT_REPONAME", "widgets"),
            ("CIRCLE_BRANCH", "feature"),
            ("CIRCLE_SHA1", "abc123"),
            ("CIRCLE_TAG", "v1.0.0"),
            ("CIRCLE_BUILD_URL", "https://circleci.com/gh/acme/widgets/17"),
        ]));
        assert_eq!(cc.repo_owner(), "acme");
        assert_eq!(cc.repo_name(), "widgets");
        assert_eq!(cc.branch(), "feature");
        assert_eq!(cc.sha(), "abc123");
        assert_eq!(cc.tag(), "v1.0.0");
        assert_eq!(cc.job_url(), "https://circleci.com/gh/acme/widgets/17");
        assert_eq!(cc.git_ref(), "");
        assert_eq!(cc.pr_base_branch(), "");
    }

    #[test]
    fn pr_number_from_url() {
        let cc = CircleCi::new(env(&[
            ("CIRCLECI", "true"),
            ("CIRCLE_PULL_REQUEST", "https://github.com/acme/widgets/pull/42"),
        ]));
        assert!(cc.is_pr());
        assert_eq!(cc.pr_number().unwrap(), 42);
    }

    #[test]
    fn pr_number_zero_when_not_pr() {
        let cc = CircleCi::new(env(&[("CIRCLECI", "true")]));
        assert!(!cc.is_pr());
        assert_eq!(cc.pr_number().unwrap(), 0);
    }

    #[test]
    fn pr_number_without_slash_is_malformed_ref() {
        let cc = CircleCi::new(env(&[("CIRCLE_PULL_REQUEST", "42")]));
        assert!(matches!(
            cc.pr_number(),
            Err(CiEnvError::MalformedRef { .. })
        ));
    }

    #[test]
    fn pr_number_non_numeric_segment() {
        let cc = CircleCi::new(env(&[(
            "CIRCLE_PULL_REQUEST",
            "https://github.com/acme/widgets/pull/abc",
        )]));
        assert!(matches!(
            cc.pr_number(),
            Err(CiEnvError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn pr_number_trailing_slash_is_error() {
        let cc = CircleCi::new(env(&[(
            "CIRCLE_PULL_REQUEST",
            "https://github.com/acme/widgets/pull/",
        )]));
        assert!(cc.pr_number().is_err());
    }
}
