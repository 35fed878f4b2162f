//! # Repository Identity
//!
//! A [`Repository`] identifies the source-control location a set of jobs is
//! tied to: a clone URL plus the branch a particular job builds. Every
//! compiled job carries one, and the publisher uses the URL to decide which
//! remote jobs belong to it.
//!
//! The short `name` is derived from the URL alone (final path segment with any
//! trailing `.git`/`.git/` stripped), so two repositories with the same URL
//! always agree on their name regardless of branch. Job names and the default
//! node assignment are built from it.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A source-control repository used in a continuous integration job.
///
/// Immutable after construction; `name()` is a pure function of `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository clone URL
    pub url: String,
    /// Branch used in a particular job
    pub branch: String,
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r".*/([^./]+)(\.git/?)?$").unwrap())
}

impl Repository {
    /// Create a repository reference for the given clone URL and branch.
    pub fn new(url: impl Into<String>, branch: impl Into<String>) -> Self {
        Repository {
            url: url.into(),
            branch: branch.into(),
        }
    }

    /// The repository's short name, determined from its URL.
    ///
    /// e.g. `https://server/repo.git` has the name `repo`.
    pub fn name(&self) -> Result<String> {
        let captures = name_pattern()
            .captures(&self.url)
            .ok_or_else(|| Error::ConfigParse {
                message: format!("could not derive a repository name from URL '{}'", self.url),
                hint: Some("expected a URL ending in a path segment, e.g. https://server/repo.git".to_string()),
            })?;
        Ok(captures[1].to_string())
    }
}
