//! Label operations.

use octorest_core::{ConfirmPolicy, RepoRef};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::pagination::Paginator;

/// An issue label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Numeric id.
    pub id: u64,
    /// Label name.
    pub name: String,
    /// Hex color without the leading `#`.
    pub color: String,
    /// Description.
    pub description: Option<String>,
    /// Whether this is one of GitHub's default labels.
    #[serde(default)]
    pub default: bool,
}

/// Label service.
#[derive(Debug)]
pub struct Labels<'a> {
    client: &'a Client,
}

impl Client {
    /// Label operations.
    pub fn labels(&self) -> Labels<'_> {
        Labels { client: self }
    }
}

impl Labels<'_> {
    /// Lazily list labels in a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved.
    pub fn list(&self, repo: &RepoRef) -> Result<Paginator<'_, Label>, Error> {
        let desc = RequestDescriptor::get(format!("{}/labels", repo.resolve()?))
            .query("per_page", self.client.page_size().to_string())
            .build()?;
        Ok(self.client.paginate(desc))
    }

    /// Get a single label by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn get(&self, repo: &RepoRef, name: &str) -> Result<Label, Error> {
        let desc = RequestDescriptor::get(format!(
            "{}/labels/{}",
            repo.resolve()?,
            urlencoding::encode(name),
        ))
        .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Create a label.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn create(
        &self,
        repo: &RepoRef,
        name: &str,
        color: &str,
        description: Option<&str>,
    ) -> Result<Label, Error> {
        let mut body = json!({ "name": name, "color": color });
        if let Some(description) = description {
            body["description"] = json!(description);
        }
        let desc = RequestDescriptor::post(format!("{}/labels", repo.resolve()?))
            .body(body)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Update a label's name, color, or description.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn update(
        &self,
        repo: &RepoRef,
        name: &str,
        new_name: Option<&str>,
        color: Option<&str>,
        description: Option<&str>,
    ) -> Result<Label, Error> {
        let mut body = json!({});
        if let Some(new_name) = new_name {
            body["new_name"] = json!(new_name);
        }
        if let Some(color) = color {
            body["color"] = json!(color);
        }
        if let Some(description) = description {
            body["description"] = json!(description);
        }
        let desc = RequestDescriptor::patch(format!(
            "{}/labels/{}",
            repo.resolve()?,
            urlencoding::encode(name),
        ))
        .body(body)
        .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Delete a label. Consults the confirmation policy.
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
        confirm.check(&format!("delete label {name} from {path}"))?;
        let desc =
            RequestDescriptor::delete(format!("{path}/labels/{}", urlencoding::encode(name)))
                .build()?;
        self.client.invoke_status(&desc).await?;
        Ok(())
    }
}
