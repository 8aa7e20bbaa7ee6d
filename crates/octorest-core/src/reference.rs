//! Tagged reference forms for addressing a repository.
//!
//! Callers can hold a repository as an `OWNER/NAME` string, a web URL, or
//! a numeric database id. [`RepoRef`] captures all three and resolves them
//! once into the canonical REST path segment, so per-resource code never
//! branches on the input form.

use url::Url;

use crate::repo::{Repo, RepoParseError};

/// A repository reference in one of the accepted input forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoRef {
    /// `OWNER/NAME` (optionally `HOST/OWNER/NAME`).
    FullName(String),
    /// A web or git remote URL.
    Url(Url),
    /// GitHub's numeric repository id.
    Id(u64),
}

impl RepoRef {
    /// Resolve the reference into the canonical REST path segment.
    ///
    /// `OWNER/NAME` and URL forms resolve to `repos/OWNER/NAME`; numeric
    /// ids resolve to `repositories/ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if a name or URL form cannot be parsed.
    pub fn resolve(&self) -> Result<String, RepoParseError> {
        match self {
            Self::FullName(nwo) => Ok(Repo::from_full_name(nwo)?.api_path()),
            Self::Url(u) => Ok(Repo::from_url(u)?.api_path()),
            Self::Id(id) => Ok(format!("repositories/{id}")),
        }
    }

    /// The hostname carried by this reference, if the form includes one.
    pub fn host(&self) -> Option<String> {
        match self {
            Self::FullName(nwo) => Repo::from_full_name(nwo).ok().map(|r| r.host().to_string()),
            Self::Url(u) => u.host_str().map(crate::instance::normalize_hostname),
            Self::Id(_) => None,
        }
    }
}

impl From<Repo> for RepoRef {
    fn from(repo: Repo) -> Self {
        Self::FullName(format!("{}/{}/{}", repo.host(), repo.owner(), repo.name()))
    }
}

impl From<u64> for RepoRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}
