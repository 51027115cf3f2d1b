//! Injected access to environment variables and files.
//!
//! Every platform adapter reads the outside world exclusively through an
//! [`Env`], which bundles two capabilities:
//!
//! - `getenv(name)` returns the variable's value, or `""` when unset
//! - `open(path)` opens a file for reading
//!
//! [`Env::system`] is backed by the real process environment and filesystem.
//! Tests swap either capability for an in-memory one.
//!
//! # Example
//!
//! ```
//! use ci_env::Env;
//!
//! let env = Env::from_vars([("CIRCLECI", "true")]);
//! assert_eq!(env.var("CIRCLECI"), "true");
//! assert_eq!(env.var("DRONE"), "");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

/// Environment variable lookup. Unset variables map to `""`.
pub type GetEnv = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// File opener. The returned reader is closed when dropped.
pub type OpenFile = Arc<dyn Fn(&Path) -> io::Result<Box<dyn Read>> + Send + Sync>;

/// Accessor bundle handed to every platform adapter.
#[derive(Clone)]
pub struct Env {
    getenv: GetEnv,
    open: OpenFile,
}

impl Env {
    /// Process environment and real filesystem.
    pub fn system() -> Self {
        Self {
            getenv: Arc::new(|name: &str| std::env::var(name).unwrap_or_default()),
            open: Arc::new(open_fs),
        }
    }

    /// Fixed set of variables with the real filesystem.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            getenv: Arc::new(move |name: &str| map.get(name).cloned().unwrap_or_default()),
            open: Arc::new(open_fs),
        }
    }

    /// Replace the variable lookup.
    pub fn with_getenv<F>(mut self, getenv: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.getenv = Arc::new(getenv);
        self
    }

    /// Replace the file opener.
    pub fn with_open<F>(mut self, open: F) -> Self
    where
        F: Fn(&Path) -> io::Result<Box<dyn Read>> + Send + Sync + 'static,
    {
        self.open = Arc::new(open);
        self
    }

    /// Look up a variable; `""` when unset.
    pub fn var(&self, name: &str) -> String {
        (self.getenv)(name)
    }

    /// True when the variable is set to a non-empty value.
    pub fn is_set(&self, name: &str) -> bool {
        !self.var(name).is_empty()
    }

    /// Open a file for reading.
    pub fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        (self.open)(path)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}

fn open_fs(path: &Path) -> io::Result<Box<dyn Read>> {
    let file = File::open(path)?;
    Ok(Box::new(file))
}
