//! Repository operations.

use octorest_core::{ConfirmPolicy, RepoRef};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{SimpleUser, to_body};
use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::pagination::Paginator;

/// Repository metadata from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Numeric id.
    pub id: u64,
    /// Repository name.
    pub name: String,
    /// `OWNER/NAME`.
    pub full_name: String,
    /// Owner.
    pub owner: SimpleUser,
    /// Whether the repo is private.
    pub private: bool,
    /// Description.
    pub description: Option<String>,
    /// Whether the repo is a fork.
    pub fork: bool,
    /// Web URL.
    pub html_url: String,
    /// Default branch name.
    pub default_branch: Option<String>,
    /// Star count.
    pub stargazers_count: Option<u64>,
    /// Fork count.
    pub forks_count: Option<u64>,
    /// Whether the repo is archived.
    pub archived: Option<bool>,
    /// Repository topics.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Parameters for creating a repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRepository {
    /// Repository name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Create as private.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Initialize with a README.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
}

/// Parameters for updating a repository; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRepository {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Change visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// New default branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    /// Archive the repository. Unarchiving is not supported by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Repository service.
#[derive(Debug)]
pub struct Repos<'a> {
    client: &'a Client,
}

impl Client {
    /// Repository operations.
    pub fn repos(&self) -> Repos<'_> {
        Repos { client: self }
    }
}

impl Repos<'_> {
    /// Get a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn get(&self, repo: &RepoRef) -> Result<Repository, Error> {
        let desc = RequestDescriptor::get(repo.resolve()?).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Lazily list repositories for a user or organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be built; page fetches
    /// report their own errors as the paginator is consumed.
    pub fn list_for_owner(&self, owner: &str) -> Result<Paginator<'_, Repository>, Error> {
        let desc = RequestDescriptor::get(format!("users/{owner}/repos"))
            .query("per_page", self.client.page_size().to_string())
            .build()?;
        Ok(self.client.paginate(desc))
    }

    /// Lazily list repositories of the authenticated user.
    ///
    /// # Errors
    ///
    /// Same as [`list_for_owner`](Self::list_for_owner).
    pub fn list_for_authenticated_user(&self) -> Result<Paginator<'_, Repository>, Error> {
        let desc = RequestDescriptor::get("user/repos")
            .query("per_page", self.client.page_size().to_string())
            .build()?;
        Ok(self.client.paginate(desc))
    }

    /// Create a repository for the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create(&self, params: &NewRepository) -> Result<Repository, Error> {
        let desc = RequestDescriptor::post("user/repos")
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Create a repository in an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create_in_org(&self, org: &str, params: &NewRepository) -> Result<Repository, Error> {
        let desc = RequestDescriptor::post(format!("orgs/{org}/repos"))
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Update repository settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn update(
        &self,
        repo: &RepoRef,
        params: &UpdateRepository,
    ) -> Result<Repository, Error> {
        let desc = RequestDescriptor::patch(repo.resolve()?)
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Delete a repository. Irreversible; consults the confirmation policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy denies the deletion or the call
    /// fails.
    pub async fn delete(&self, repo: &RepoRef, confirm: &ConfirmPolicy) -> Result<(), Error> {
        let path = repo.resolve()?;
        confirm.check(&format!("delete repository {path}"))?;
        let desc = RequestDescriptor::delete(path).build()?;
        self.client.invoke_status(&desc).await?;
        Ok(())
    }

    /// List all topics on a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn list_topics(&self, repo: &RepoRef) -> Result<Vec<String>, Error> {
        #[derive(Deserialize)]
        struct Topics {
            names: Vec<String>,
        }
        let desc = RequestDescriptor::get(format!("{}/topics", repo.resolve()?)).build()?;
        let topics: Topics = self.client.invoke(&desc).await?;
        Ok(topics.names)
    }

    /// Replace all topics on a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn replace_topics(&self, repo: &RepoRef, names: &[String]) -> Result<Vec<String>, Error> {
        #[derive(Deserialize)]
        struct Topics {
            names: Vec<String>,
        }
        let desc = RequestDescriptor::put(format!("{}/topics", repo.resolve()?))
            .body(json!({ "names": names }))
            .build()?;
        let topics: Topics = self.client.invoke(&desc).await?;
        Ok(topics.names)
    }
}
