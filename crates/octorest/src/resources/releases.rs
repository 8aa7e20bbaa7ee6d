//! Release operations, including asset upload and download.

use octorest_core::{ConfirmPolicy, RepoRef};
use serde::{Deserialize, Serialize};

use super::to_body;
use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::media::MediaType;
use crate::pagination::Paginator;

/// A release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Numeric id.
    pub id: u64,
    /// Git tag the release points at.
    pub tag_name: String,
    /// Release title.
    pub name: Option<String>,
    /// Release notes.
    pub body: Option<String>,
    /// Whether this is a draft.
    pub draft: bool,
    /// Whether this is a prerelease.
    pub prerelease: bool,
    /// Upload URL template for assets (RFC 6570, ends in `{?name,label}`).
    pub upload_url: String,
    /// Attached assets.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Publish timestamp.
    pub published_at: Option<String>,
}

/// A binary asset attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// Numeric id.
    pub id: u64,
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: String,
    /// Direct download URL.
    pub browser_download_url: String,
}

/// Parameters for creating a release.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRelease {
    /// Git tag to release.
    pub tag_name: String,
    /// Release title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Release notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Create as draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Mark as prerelease.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
}

/// Release service.
#[derive(Debug)]
pub struct Releases<'a> {
    client: &'a Client,
}

impl Client {
    /// Release operations.
    pub fn releases(&self) -> Releases<'_> {
        Releases { client: self }
    }
}

impl Releases<'_> {
    /// Get a release by tag name.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn get_by_tag(&self, repo: &RepoRef, tag: &str) -> Result<Release, Error> {
        let desc = RequestDescriptor::get(format!(
            "{}/releases/tags/{}",
            repo.resolve()?,
            urlencoding::encode(tag),
        ))
        .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Get the latest published release.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn latest(&self, repo: &RepoRef) -> Result<Release, Error> {
        let desc =
            RequestDescriptor::get(format!("{}/releases/latest", repo.resolve()?)).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Lazily list releases.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved.
    pub fn list(&self, repo: &RepoRef) -> Result<Paginator<'_, Release>, Error> {
        let desc = RequestDescriptor::get(format!("{}/releases", repo.resolve()?))
            .query("per_page", self.client.page_size().to_string())
            .build()?;
        Ok(self.client.paginate(desc))
    }

    /// Create a release.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn create(&self, repo: &RepoRef, params: &NewRelease) -> Result<Release, Error> {
        let desc = RequestDescriptor::post(format!("{}/releases", repo.resolve()?))
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Delete a release. Consults the confirmation policy.
    ///
    /// The underlying tag is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy denies the deletion or the call
    /// fails.
    pub async fn delete(
        &self,
        repo: &RepoRef,
        release_id: u64,
        confirm: &ConfirmPolicy,
    ) -> Result<(), Error> {
        let path = repo.resolve()?;
        confirm.check(&format!("delete release {release_id} from {path}"))?;
        let desc = RequestDescriptor::delete(format!("{path}/releases/{release_id}")).build()?;
        self.client.invoke_status(&desc).await?;
        Ok(())
    }

    /// Upload a binary asset to a release.
    ///
    /// Expands the release's upload URL template with the asset name and
    /// posts the bytes with the given content type.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or non-success status.
    pub async fn upload_asset(
        &self,
        release: &Release,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<ReleaseAsset, Error> {
        let url = format!(
            "{}?name={}",
            expand_upload_url(&release.upload_url),
            urlencoding::encode(name),
        );
        Ok(self.client.upload(&url, data, content_type).await?)
    }

    /// Download a release asset as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn download_asset(&self, repo: &RepoRef, asset_id: u64) -> Result<Vec<u8>, Error> {
        let desc = RequestDescriptor::get(format!("{}/releases/assets/{asset_id}", repo.resolve()?))
            .accept(MediaType::Custom("application/octet-stream".to_string()))
            .build()?;
        Ok(self.client.invoke_bytes(&desc).await?)
    }
}

/// Strip the RFC 6570 template suffix from an upload URL.
fn expand_upload_url(template: &str) -> &str {
    template.split('{').next().unwrap_or(template)
}
