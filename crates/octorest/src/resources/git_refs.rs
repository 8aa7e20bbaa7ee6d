//! Git reference operations (branches and tags as refs).

use octorest_core::{ConfirmPolicy, RepoRef};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::pagination::Paginator;

/// A git reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRef {
    /// Fully-qualified ref name, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub name: String,
    /// API URL of this ref.
    pub url: String,
    /// The object the ref points at.
    pub object: GitObject,
}

/// The target of a git reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitObject {
    /// Object SHA.
    pub sha: String,
    /// Object type (`commit`, `tag`).
    #[serde(rename = "type")]
    pub object_type: String,
    /// API URL of the object.
    pub url: String,
}

/// Git reference service.
///
/// Ref names are given without the `refs/` prefix, e.g. `heads/main` or
/// `tags/v1.0.0`, matching the REST paths.
#[derive(Debug)]
pub struct GitRefs<'a> {
    client: &'a Client,
}

impl Client {
    /// Git reference operations.
    pub fn git_refs(&self) -> GitRefs<'_> {
        GitRefs { client: self }
    }
}

impl GitRefs<'_> {
    /// Get a single reference, e.g. `heads/main`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn get(&self, repo: &RepoRef, name: &str) -> Result<GitRef, Error> {
        let desc =
            RequestDescriptor::get(format!("{}/git/ref/{name}", repo.resolve()?)).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Lazily list references under a namespace, e.g. `heads` or `tags`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved.
    pub fn list(&self, repo: &RepoRef, namespace: &str) -> Result<Paginator<'_, GitRef>, Error> {
        let desc = RequestDescriptor::get(format!("{}/git/matching-refs/{namespace}", repo.resolve()?))
            .query("per_page", self.client.page_size().to_string())
            .build()?;
        Ok(self.client.paginate(desc))
    }

    /// Create a reference pointing at a SHA.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn create(&self, repo: &RepoRef, name: &str, sha: &str) -> Result<GitRef, Error> {
        let desc = RequestDescriptor::post(format!("{}/git/refs", repo.resolve()?))
            .body(json!({ "ref": format!("refs/{name}"), "sha": sha }))
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Move a reference to a new SHA.
    ///
    /// Non-fast-forward updates require `force`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn update(
        &self,
        repo: &RepoRef,
        name: &str,
        sha: &str,
        force: bool,
    ) -> Result<GitRef, Error> {
        let desc = RequestDescriptor::patch(format!("{}/git/refs/{name}", repo.resolve()?))
            .body(json!({ "sha": sha, "force": force }))
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Delete a reference. Consults the confirmation policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy denies the deletion or the call
    /// fails.
    pub async fn delete(
        &self,
        repo: &RepoRef,
        name: &str,
        confirm: &ConfirmPolicy,
    ) -> Result<(), Error> {
        let path = repo.resolve()?;
        confirm.check(&format!("delete ref {name} from {path}"))?;
        let desc = RequestDescriptor::delete(format!("{path}/git/refs/{name}")).build()?;
        self.client.invoke_status(&desc).await?;
        Ok(())
    }
}
