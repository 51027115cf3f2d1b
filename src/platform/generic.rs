//! Generic, template-driven adapter.
//!
//! Lets unlisted or self-hosted CI systems be described in configuration.
//! Every field is a list of templates; the first one that renders to a
//! non-blank string wins.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::{parse_pr_number, Platform};
use crate::config::GenericConfig;
use crate::error::Result;
use crate::template::Render;

/// Registry identifier.
pub const ID: &str = "generic";

/// A templated field of the generic platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericField {
    Id,
    Match,
    RepoOwner,
    RepoName,
    Branch,
    Sha,
    Tag,
    Ref,
    IsPr,
    PrNumber,
    PrBaseBranch,
    JobUrl,
}

impl fmt::Display for GenericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenericField::Id => "id",
            GenericField::Match => "match",
            GenericField::RepoOwner => "repo_owner",
            GenericField::RepoName => "repo_name",
            GenericField::Branch => "branch",
            GenericField::Sha => "sha",
            GenericField::Tag => "tag",
            GenericField::Ref => "ref",
            GenericField::IsPr => "is_pr",
            GenericField::PrNumber => "pr_number",
            GenericField::PrBaseBranch => "pr_base_branch",
            GenericField::JobUrl => "job_url",
        };
        write!(f, "{}", name)
    }
}

/// Generic platform configured with templates.
#[derive(Clone)]
pub struct Generic {
    config: GenericConfig,
    renderer: Arc<dyn Render>,
}

impl Generic {
    pub fn new(config: GenericConfig, renderer: Arc<dyn Render>) -> Self {
        Self { config, renderer }
    }

    fn templates(&self, field: GenericField) -> &[String] {
        let c = &self.config;
        match field {
            GenericField::Id => &c.id,
            GenericField::Match => &c.match_,
            GenericField::RepoOwner => &c.repo_owner,
            GenericField::RepoName => &c.repo_name,
            GenericField::Branch => &c.branch,
            GenericField::Sha => &c.sha,
            GenericField::Tag => &c.tag,
            GenericField::Ref => &c.git_ref,
            GenericField::IsPr if c.is_pr.is_empty() => &c.pr_number,
            GenericField::IsPr => &c.is_pr,
            GenericField::PrNumber => &c.pr_number,
            GenericField::PrBaseBranch => &c.pr_base_branch,
            GenericField::JobUrl => &c.job_url,
        }
    }

    /// Render a field: the first template producing a non-blank result,
    /// trimmed, or `""` when every template is blank.
    ///
    /// # Errors
    ///
    /// The first rendering failure aborts the search.
    pub fn try_render(&self, field: GenericField) -> Result<String> {
        for template in self.templates(field) {
            let rendered = self.renderer.render(template)?;
            let trimmed = rendered.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
        Ok(String::new())
    }

    fn render_or_empty(&self, field: GenericField) -> String {
        self.try_render(field).unwrap_or_else(|e| {
            warn!(field = %field, error = %e, "generic platform template failed");
            String::new()
        })
    }
}

impl fmt::Debug for Generic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generic")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Platform for Generic {
    fn id(&self) -> String {
        let id = self.render_or_empty(GenericField::Id);
        if id.is_empty() {
            ID.to_string()
        } else {
            id
        }
    }

    fn matches(&self) -> bool {
        !self.render_or_empty(GenericField::Match).is_empty()
    }

    fn repo_owner(&self) -> String {
        self.render_or_empty(GenericField::RepoOwner)
    }

    fn repo_name(&self) -> String {
        self.render_or_empty(GenericField::RepoName)
    }

    fn branch(&self) -> String {
        self.render_or_empty(GenericField::Branch)
    }

    fn sha(&self) -> String {
        self.render_or_empty(GenericField::Sha)
    }

    fn tag(&self) -> String {
        self.render_or_empty(GenericField::Tag)
    }

    fn git_ref(&self) -> String {
        self.render_or_empty(GenericField::Ref)
    }

    fn is_pr(&self) -> bool {
        !self.render_or_empty(GenericField::IsPr).is_empty()
    }

    fn pr_number(&self) -> Result<u64> {
        let rendered = self.try_render(GenericField::PrNumber)?;
        parse_pr_number("generic pr_number", &rendered)
    }

    fn pr_base_branch(&self) -> String {
        self.render_or_empty(GenericField::PrBaseBranch)
    }

    fn job_url(&self) -> String {
        self.render_or_empty(GenericField::JobUrl)
    }
}
