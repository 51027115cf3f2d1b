//! Platform registry and detection.
//!
//! The [`PlatformRegistry`] is an explicit, ordered table of
//! `(id, constructor)` entries. Detection walks it in order, builds each
//! platform against the supplied [`Env`], and returns the first one whose
//! [`Platform::matches`] is true.
//!
//! # Priority
//!
//! Built-in platforms are registered in this order (first match wins):
//! 1. `github-actions`
//! 2. `circleci`
//! 3. `drone`
//! 4. `codebuild`
//! 5. `atlantis`
//! 6. `cloudbuild`
//!
//! A configured generic platform is appended last.
//!
//! # Example
//!
//! ```
//! use ci_env::{Env, PlatformRegistry};
//!
//! let registry = PlatformRegistry::with_builtins();
//! let env = Env::from_vars([("DRONE", "true"), ("DRONE_PULL_REQUEST", "8")]);
//!
//! let platform = registry.detect(&env).unwrap();
//! assert_eq!(platform.id(), "drone");
//! assert_eq!(platform.pr_number().unwrap(), 8);
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::GenericConfig;
use crate::env::Env;
use crate::platform::{
    atlantis, circleci, cloudbuild, codebuild, drone, generic, github_actions, Atlantis,
    CircleCi, CloudBuild, CodeBuild, Drone, Generic, GitHubActions, Platform,
};
use crate::template::EnvRenderer;

/// Builds a platform for a given environment.
pub type Constructor = Arc<dyn Fn(&Env) -> Box<dyn Platform> + Send + Sync>;

struct Entry {
    id: String,
    build: Constructor,
}

/// Ordered table of known platforms.
#[derive(Clone, Default)]
pub struct PlatformRegistry {
    entries: Vec<Arc<Entry>>,
}

impl PlatformRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a registry with all built-in platforms.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(github_actions::ID, |env| {
            Box::new(GitHubActions::new(env.clone()))
        });
        registry.register(circleci::ID, |env| Box::new(CircleCi::new(env.clone())));
        registry.register(drone::ID, |env| Box::new(Drone::new(env.clone())));
        registry.register(codebuild::ID, |env| Box::new(CodeBuild::new(env.clone())));
        registry.register(atlantis::ID, |env| Box::new(Atlantis::new(env.clone())));
        registry.register(cloudbuild::ID, |env| Box::new(CloudBuild::new(env.clone())));
        registry
    }

    /// Append the generic platform, rendering its templates from the
    /// environment.
    pub fn with_generic(mut self, config: GenericConfig) -> Self {
        self.register(generic::ID, move |env| {
            Box::new(Generic::new(
                config.clone(),
                Arc::new(EnvRenderer::new(env.clone())),
            ))
        });
        self
    }

    /// Register a platform.
    ///
    /// An existing entry with the same id is replaced in place, keeping its
    /// priority; otherwise the entry goes last.
    pub fn register<F>(&mut self, id: impl Into<String>, build: F)
    where
        F: Fn(&Env) -> Box<dyn Platform> + Send + Sync + 'static,
    {
        let entry = Arc::new(Entry {
            id: id.into(),
            build: Arc::new(build),
        });
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    /// Build the platform registered under `id` without checking whether it
    /// matches.
    pub fn get(&self, id: &str, env: &Env) -> Option<Box<dyn Platform>> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| (e.build)(env))
    }

    /// Detect the active platform. First match wins.
    pub fn detect(&self, env: &Env) -> Option<Box<dyn Platform>> {
        for entry in &self.entries {
            let platform = (entry.build)(env);
            if platform.matches() {
                debug!(platform = %entry.id, "CI platform matched");
                return Some(platform);
            }
            debug!(platform = %entry.id, "CI platform did not match");
        }
        debug!("no CI platform matched");
        None
    }

    /// Registered ids in priority order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    /// Check whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.ids().any(|registered| registered == id)
    }

    /// Get the number of registered platforms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

/// Detect the platform of the current process with the built-in registry.
pub fn detect() -> Option<Box<dyn Platform>> {
    PlatformRegistry::with_builtins().detect(&Env::system())
}
