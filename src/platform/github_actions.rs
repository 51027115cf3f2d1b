//! GitHub Actions adapter.
//!
//! Most fields come straight from `GITHUB_*` variables. The pull request
//! number is the exception: depending on `GITHUB_EVENT_NAME` it is read from
//! the merge queue ref name or from the webhook payload at
//! `GITHUB_EVENT_PATH`.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use super::{tag_from_ref, trim_heads, Platform};
use crate::env::Env;
use crate::error::{CiEnvError, Result};

/// Registry identifier.
pub const ID: &str = "github-actions";

const PR_EVENTS: [&str; 2] = ["pull_request", "pull_request_target"];
const ISSUE_EVENTS: [&str; 2] = ["issues", "issue_comment"];
const MERGE_GROUP_EVENT: &str = "merge_group";

#[derive(Debug, Deserialize)]
struct NumberField {
    #[serde(default)]
    number: u64,
}

/// A missing or `null` object reads as number 0.
#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    pull_request: Option<NumberField>,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    #[serde(default)]
    issue: Option<NumberField>,
}

/// GitHub Actions platform.
#[derive(Debug, Clone)]
pub struct GitHubActions {
    env: Env,
}

impl GitHubActions {
    pub fn new(env: Env) -> Self {
        Self { env }
    }

    /// Split `GITHUB_REPOSITORY` into owner and name, preferring
    /// `GITHUB_REPOSITORY_OWNER` for the owner.
    fn repository(&self) -> (String, String) {
        let repository = self.env.var("GITHUB_REPOSITORY");
        let owner = self.env.var("GITHUB_REPOSITORY_OWNER");
        if !owner.is_empty() {
            let prefix = format!("{}/", owner);
            let name = repository
                .strip_prefix(&prefix)
                .unwrap_or(&repository)
                .to_string();
            return (owner, name);
        }
        match repository.split_once('/') {
            Some((owner, name)) => (owner.to_string(), name.to_string()),
            None => (String::new(), repository),
        }
    }

    /// `gh-readonly-queue/<base>/pr-<number>-<sha>` -> `<number>`
    fn pr_number_from_merge_group(&self) -> Result<u64> {
        let ref_name = self.env.var("GITHUB_REF_NAME");
        let malformed = || CiEnvError::MalformedRef {
            var: "GITHUB_REF_NAME".to_string(),
            value: ref_name.clone(),
        };
        let base = ref_name.rsplit('/').next().unwrap_or_default();
        let (digits, _) = base
            .strip_prefix("pr-")
            .and_then(|rest| rest.split_once('-'))
            .ok_or_else(malformed)?;
        digits
            .parse()
            .map_err(|source| CiEnvError::MalformedNumber {
                var: "GITHUB_REF_NAME".to_string(),
                value: ref_name.clone(),
                source,
            })
    }

    fn pr_number_from_payload(&self, event_name: &str) -> Result<u64> {
        let event_path = self.env.var("GITHUB_EVENT_PATH");
        let reads_payload =
            PR_EVENTS.contains(&event_name) || ISSUE_EVENTS.contains(&event_name);
        if event_path.is_empty() && !reads_payload {
            return Ok(0);
        }
        let path = PathBuf::from(event_path);
        let reader = self
            .env
            .open(&path)
            .map_err(|source| CiEnvError::EventFile {
                path: path.clone(),
                source,
            })?;
        // The reader is dropped when this function returns, on every path.
        if ISSUE_EVENTS.contains(&event_name) {
            let payload: IssuePayload =
                serde_json::from_reader(reader).map_err(|source| CiEnvError::Decode {
                    payload: "issue",
                    source,
                })?;
            Ok(payload.issue.map_or(0, |issue| issue.number))
        } else {
            let payload: PullRequestPayload =
                serde_json::from_reader(reader).map_err(|source| CiEnvError::Decode {
                    payload: "pull request",
                    source,
                })?;
            Ok(payload.pull_request.map_or(0, |pr| pr.number))
        }
    }
}

impl Platform for GitHubActions {
    fn id(&self) -> String {
        ID.to_string()
    }

    fn matches(&self) -> bool {
        self.env.is_set("GITHUB_ACTIONS")
    }

    fn repo_owner(&self) -> String {
        self.repository().0
    }

    fn repo_name(&self) -> String {
        self.repository().1
    }

    fn branch(&self) -> String {
        trim_heads(&self.env.var("GITHUB_REF")).to_string()
    }

    fn sha(&self) -> String {
        self.env.var("GITHUB_SHA")
    }

    fn tag(&self) -> String {
        tag_from_ref(&self.env.var("GITHUB_REF")).to_string()
    }

    fn git_ref(&self) -> String {
        self.env.var("GITHUB_REF")
    }

    fn is_pr(&self) -> bool {
        PR_EVENTS.contains(&self.env.var("GITHUB_EVENT_NAME").as_str())
    }

    fn pr_number(&self) -> Result<u64> {
        let event_name = self.env.var("GITHUB_EVENT_NAME");
        debug!(event = %event_name, "resolving GitHub Actions pull request number");
        if event_name == MERGE_GROUP_EVENT {
            return self.pr_number_from_merge_group();
        }
        self.pr_number_from_payload(&event_name)
    }

    fn pr_base_branch(&self) -> String {
        trim_heads(&self.env.var("GITHUB_BASE_REF")).to_string()
    }

    fn job_url(&self) -> String {
        let server = self.env.var("GITHUB_SERVER_URL");
        let repository = self.env.var("GITHUB_REPOSITORY");
        let run_id = self.env.var("GITHUB_RUN_ID");
        if server.is_empty() || repository.is_empty() || run_id.is_empty() {
            return String::new();
        }
        format!("{}/{}/actions/runs/{}", server, repository, run_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::test_support::env;
    use std::io::{self, Read};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn with_payload(vars: &[(&str, &str)], payload: &'static str) -> GitHubActions {
        let env = env(vars).with_open(move |_| Ok(Box::new(payload.as_bytes()) as Box<dyn Read>));
        GitHubActions::new(env)
    }

    #[test]
    fn matches_when_github_actions_set() {
        assert!(GitHubActions::new(env(&[("GITHUB_ACTIONS", "true")])).matches());
        assert!(!GitHubActions::new(env(&[])).matches());
    }

    #[test]
    fn repo_owner_prefers_owner_variable() {
        let gh = GitHubActions::new(env(&[
            ("GITHUB_REPOSITORY_OWNER", "acme"),
            ("GITHUB_REPOSITORY", "acme/widgets"),
        ]));
        assert_eq!(gh.repo_owner(), "acme");
        assert_eq!(gh.repo_name(), "widgets");
    }

    #[test]
    fn repo_split_without_owner_variable() {
        let gh = GitHubActions::new(env(&[("GITHUB_REPOSITORY", "acme/widgets")]));
        assert_eq!(gh.repo_owner(), "acme");
        assert_eq!(gh.repo_name(), "widgets");
    }

    #[test]
    fn repo_empty_when_unset() {
        let gh = GitHubActions::new(env(&[]));
        assert_eq!(gh.repo_owner(), "");
        assert_eq!(gh.repo_name(), "");
    }

    #[test]
    fn branch_and_tag_from_ref() {
        let gh = GitHubActions::new(env(&[("GITHUB_REF", "refs/heads/main")]));
        assert_eq!(gh.branch(), "main");
        assert_eq!(gh.tag(), "");
        assert_eq!(gh.git_ref(), "refs/heads/main");

        let gh = GitHubActions::new(env(&[("GITHUB_REF", "refs/tags/v1.0.0")]));
        assert_eq!(gh.tag(), "v1.0.0");
    }

    #[test]
    fn pr_base_branch_strips_heads() {
        let gh = GitHubActions::new(env(&[("GITHUB_BASE_REF", "refs/heads/main")]));
        assert_eq!(gh.pr_base_branch(), "main");
        let gh = GitHubActions::new(env(&[("GITHUB_BASE_REF", "develop")]));
        assert_eq!(gh.pr_base_branch(), "develop");
    }

    #[test]
    fn is_pr_for_pull_request_events() {
        for event in ["pull_request", "pull_request_target"] {
            let gh = GitHubActions::new(env(&[("GITHUB_EVENT_NAME", event)]));
            assert!(gh.is_pr(), "{event}");
        }
        for event in ["push", "merge_group", "issue_comment", ""] {
            let gh = GitHubActions::new(env(&[("GITHUB_EVENT_NAME", event)]));
            assert!(!gh.is_pr(), "{event}");
        }
    }

    #[test]
    fn pr_number_from_pull_request_payload() {
        let gh = with_payload(
            &[
                ("GITHUB_EVENT_NAME", "pull_request"),
                ("GITHUB_EVENT_PATH", "/event.json"),
            ],
            r#"{"action":"opened","pull_request":{"number":42,"title":"x"}}"#,
        );
        assert_eq!(gh.pr_number().unwrap(), 42);
    }

    #[test]
    fn pr_number_from_issue_comment_payload() {
        for event in ["issue_comment", "issues"] {
            let gh = with_payload(
                &[("GITHUB_EVENT_NAME", event)],
                r#"{"issue":{"number":7},"pull_request":{"number":99}}"#,
            );
            assert_eq!(gh.pr_number().unwrap(), 7, "{event}");
        }
    }

    #[test]
    fn pr_number_zero_when_payload_has_no_pull_request() {
        let gh = with_payload(&[("GITHUB_EVENT_NAME", "push")], r#"{"ref":"refs/heads/main"}"#);
        assert_eq!(gh.pr_number().unwrap(), 0);
    }

    #[test]
    fn pr_number_decode_failure() {
        let gh = with_payload(&[("GITHUB_EVENT_NAME", "pull_request")], "not json");
        let err = gh.pr_number().unwrap_err();
        assert!(matches!(
            err,
            CiEnvError::Decode {
                payload: "pull request",
                ..
            }
        ));
    }

    #[test]
    fn pr_number_zero_for_push_without_event_path() {
        let gh = GitHubActions::new(
            env(&[("GITHUB_ACTIONS", "true"), ("GITHUB_EVENT_NAME", "push")])
                .with_open(|_| panic!("no payload to open")),
        );
        assert_eq!(gh.pr_number().unwrap(), 0);
    }

    #[test]
    fn pull_request_without_event_path_is_an_error() {
        for event in ["pull_request", "pull_request_target", "issue_comment"] {
            let gh = GitHubActions::new(
                env(&[("GITHUB_ACTIONS", "true"), ("GITHUB_EVENT_NAME", event)])
                    .with_open(|_| Err(io::Error::new(io::ErrorKind::NotFound, "missing"))),
            );
            assert!(
                matches!(gh.pr_number(), Err(CiEnvError::EventFile { .. })),
                "{event} should fail without a payload"
            );
        }
    }

    #[test]
    fn pr_number_zero_when_pull_request_is_null() {
        let gh = with_payload(
            &[("GITHUB_EVENT_NAME", "pull_request")],
            r#"{"pull_request": null}"#,
        );
        assert_eq!(gh.pr_number().unwrap(), 0);

        let gh = with_payload(&[("GITHUB_EVENT_NAME", "issues")], r#"{"issue": null}"#);
        assert_eq!(gh.pr_number().unwrap(), 0);
    }

    #[test]
    fn pr_number_open_failure() {
        let env = env(&[
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("GITHUB_EVENT_PATH", "/missing/event.json"),
        ])
        .with_open(|_| Err(io::Error::new(io::ErrorKind::NotFound, "missing")));
        let gh = GitHubActions::new(env);
        match gh.pr_number().unwrap_err() {
            CiEnvError::EventFile { path, .. } => {
                assert_eq!(path, PathBuf::from("/missing/event.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pr_number_opens_event_path() {
        let env = env(&[
            ("GITHUB_EVENT_NAME", "pull_request_target"),
            ("GITHUB_EVENT_PATH", "/github/workflow/event.json"),
        ])
        .with_open(|path| {
            assert_eq!(path, Path::new("/github/workflow/event.json"));
            Ok(Box::new(&br#"{"pull_request":{"number":3}}"#[..]) as Box<dyn Read>)
        });
        assert_eq!(GitHubActions::new(env).pr_number().unwrap(), 3);
    }

    struct TrackedReader {
        inner: &'static [u8],
        live: Arc<AtomicUsize>,
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn payload_reader_released_after_decode_failure() {
        let live = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&live);
        let env = env(&[("GITHUB_EVENT_NAME", "pull_request")]).with_open(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(TrackedReader {
                inner: b"{ broken",
                live: Arc::clone(&counter),
            }) as Box<dyn Read>)
        });
        let gh = GitHubActions::new(env);
        assert!(gh.pr_number().is_err());
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn pr_number_from_merge_group_ref() {
        let gh = GitHubActions::new(env(&[
            ("GITHUB_EVENT_NAME", "merge_group"),
            (
                "GITHUB_REF_NAME",
                "gh-readonly-queue/main/pr-4-1ad6ab67b8b4b9b7c6b5b4b3b2b1b0a9a8a7a6a5",
            ),
        ]));
        assert_eq!(gh.pr_number().unwrap(), 4);
    }

    #[test]
    fn merge_group_does_not_read_payload() {
        let env = env(&[
            ("GITHUB_EVENT_NAME", "merge_group"),
            ("GITHUB_REF_NAME", "gh-readonly-queue/main/pr-12-abcdef"),
        ])
        .with_open(|_| panic!("merge_group must not open the event payload"));
        assert_eq!(GitHubActions::new(env).pr_number().unwrap(), 12);
    }

    #[test]
    fn merge_group_without_pr_shape_is_malformed_ref() {
        for ref_name in ["gh-readonly-queue/main", "gh-readonly-queue/main/pr-4", ""] {
            let gh = GitHubActions::new(env(&[
                ("GITHUB_EVENT_NAME", "merge_group"),
                ("GITHUB_REF_NAME", ref_name),
            ]));
            assert!(
                matches!(gh.pr_number(), Err(CiEnvError::MalformedRef { .. })),
                "{ref_name}"
            );
        }
    }

    #[test]
    fn merge_group_with_non_numeric_pr_is_malformed_number() {
        let gh = GitHubActions::new(env(&[
            ("GITHUB_EVENT_NAME", "merge_group"),
            ("GITHUB_REF_NAME", "gh-readonly-queue/main/pr-abc-1ad6ab67"),
        ]));
        assert!(matches!(
            gh.pr_number(),
            Err(CiEnvError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn job_url_from_run() {
        let gh = GitHubActions::new(env(&[
            ("GITHUB_SERVER_URL", "https://github.com"),
            ("GITHUB_REPOSITORY", "acme/widgets"),
            ("GITHUB_RUN_ID", "123456"),
        ]));
        assert_eq!(
            gh.job_url(),
            "https://github.com/acme/widgets/actions/runs/123456"
        );
    }

    #[test]
    fn job_url_empty_without_run_id() {
        let gh = GitHubActions::new(env(&[
            ("GITHUB_SERVER_URL", "https://github.com"),
            ("GITHUB_REPOSITORY", "acme/widgets"),
        ]));
        assert_eq!(gh.job_url(), "");
    }
}
