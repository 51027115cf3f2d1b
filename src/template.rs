//! Template rendering for the generic platform.
//!
//! The generic adapter only needs a [`Render`] capability. Any
//! `Fn(&str) -> anyhow::Result<String>` qualifies, so callers can plug in
//! their own template engine. [`EnvRenderer`] is the built-in one.
//!
//! # Syntax
//!
//! - `${NAME}` - replaced with the value of environment variable `NAME`
//!   (empty when unset)
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - any other `$` is literal
//!
//! # Example
//!
//! ```
//! use ci_env::template::{EnvRenderer, Render};
//! use ci_env::Env;
//!
//! let renderer = EnvRenderer::new(Env::from_vars([("BUILD_REPO", "acme/widgets")]));
//! assert_eq!(renderer.render("repo=${BUILD_REPO}").unwrap(), "repo=acme/widgets");
//! ```

use crate::env::Env;
use crate::error::{CiEnvError, Result};

/// Renders a single template string.
pub trait Render: Send + Sync {
    fn render(&self, template: &str) -> Result<String>;
}

impl<F> Render for F
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    fn render(&self, template: &str) -> Result<String> {
        self(template).map_err(CiEnvError::Other)
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a template into literal and variable segments.
///
/// # Errors
///
/// Returns `Render` if a `${` is never closed.
pub fn parse_template(input: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push('$');
                }
            }
            Some('{') => {
                chars.next();
                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    var_name.push(c);
                }
                if !closed {
                    return Err(CiEnvError::Render {
                        template: input.to_string(),
                        message: format!("unterminated variable reference ${{{}", var_name),
                    });
                }
                segments.push(Segment::Variable(var_name.trim().to_string()));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    Ok(segments)
}

/// Renders `${NAME}` references from an [`Env`].
#[derive(Debug, Clone)]
pub struct EnvRenderer {
    env: Env,
}

impl EnvRenderer {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Render for EnvRenderer {
    fn render(&self, template: &str) -> Result<String> {
        let mut result = String::new();
        for segment in parse_template(template)? {
            match segment {
                Segment::Literal(text) => result.push_str(&text),
                Segment::Variable(name) => result.push_str(&self.env.var(&name)),
            }
        }
        Ok(result)
    }
}
