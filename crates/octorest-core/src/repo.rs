//! Repository identification and parsing.

use std::fmt;

use url::Url;

use crate::instance::{self, GITHUB_COM};

/// A GitHub repository identified by owner, name, and host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo {
    owner: String,
    name: String,
    host: String,
}

impl Repo {
    /// Create a new repo on github.com.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            host: GITHUB_COM.to_string(),
        }
    }

    /// Create a new repo with a specific host.
    pub fn with_host(
        owner: impl Into<String>,
        name: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            host: instance::normalize_hostname(&host.into()),
        }
    }

    /// Parse a "OWNER/REPO" or "HOST/OWNER/REPO" string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed as a repository
    /// reference.
    pub fn from_full_name(nwo: &str) -> Result<Self, RepoParseError> {
        let parts: Vec<&str> = nwo.split('/').collect();
        match parts.len() {
            2 => {
                if parts[0].is_empty() || parts[1].is_empty() {
                    return Err(RepoParseError::InvalidFormat(nwo.to_string()));
                }
                Ok(Self::new(parts[0], parts[1]))
            }
            3.. => {
                if parts[0].is_empty() || parts[1].is_empty() || parts[2].is_empty() {
                    return Err(RepoParseError::InvalidFormat(nwo.to_string()));
                }
                Ok(Self::with_host(parts[1], parts[2], parts[0]))
            }
            _ => Err(RepoParseError::InvalidFormat(nwo.to_string())),
        }
    }

    /// Parse a repository from a web or git remote URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not carry owner and name segments.
    pub fn from_url(u: &Url) -> Result<Self, RepoParseError> {
        let host = u
            .host_str()
            .ok_or_else(|| RepoParseError::InvalidUrl(u.to_string()))?;

        let path = u.path().trim_start_matches('/').trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').collect();

        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(RepoParseError::InvalidUrl(u.to_string()));
        }

        Ok(Self::with_host(parts[0], parts[1], host))
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// GitHub hostname.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full name as "OWNER/REPO".
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// REST path segment for this repository: `repos/OWNER/REPO`.
    pub fn api_path(&self) -> String {
        format!("repos/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if instance::is_github_com(&self.host) {
            write!(f, "{}/{}", self.owner, self.name)
        } else {
            write!(f, "{}/{}/{}", self.host, self.owner, self.name)
        }
    }
}

/// Errors from parsing repository references.
#[derive(Debug, thiserror::Error)]
pub enum RepoParseError {
    /// String does not match expected format.
    #[error("expected OWNER/REPO or HOST/OWNER/REPO format, got {0:?}")]
    InvalidFormat(String),
    /// URL does not contain repository information.
    #[error("cannot extract repository from URL: {0}")]
    InvalidUrl(String),
}
