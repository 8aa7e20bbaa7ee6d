//! Repository file contents: read, create, update, and delete files.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use octorest_core::{ConfirmPolicy, RepoRef};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::media::MediaType;

/// Failure decoding the base64 payload of a [`FileContent`].
#[derive(Debug, thiserror::Error)]
pub enum ContentDecodeError {
    /// The response carried no inline content (files over 1 MB).
    #[error("file content not included in response")]
    Missing,
    /// The inline content was not valid base64.
    #[error("invalid base64 content: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A file in a repository, as returned by the contents API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    /// File name.
    pub name: String,
    /// Path relative to the repository root.
    pub path: String,
    /// Blob SHA, required when updating or deleting the file.
    pub sha: String,
    /// File size in bytes.
    pub size: u64,
    /// Base64-encoded content. Absent for files over 1 MB.
    pub content: Option<String>,
    /// Content encoding, normally `base64`.
    pub encoding: Option<String>,
    /// Direct download URL.
    pub download_url: Option<String>,
}

impl FileContent {
    /// Decode the base64 content into bytes.
    ///
    /// The API wraps base64 across lines; newlines are stripped before
    /// decoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is missing or not valid base64.
    pub fn decoded_content(&self) -> Result<Vec<u8>, ContentDecodeError> {
        let encoded = self.content.as_deref().ok_or(ContentDecodeError::Missing)?;
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        Ok(BASE64.decode(compact.as_bytes())?)
    }
}

/// The result of writing a file via the contents API.
#[derive(Debug, Clone, Deserialize)]
pub struct FileCommit {
    /// The written file, absent on delete.
    pub content: Option<FileContent>,
    /// The commit that recorded the change.
    pub commit: CommitSummary,
}

/// Minimal commit info attached to a contents write.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitSummary {
    /// Commit SHA.
    pub sha: String,
    /// API URL of the commit.
    pub url: String,
}

/// Repository contents service.
#[derive(Debug)]
pub struct Contents<'a> {
    client: &'a Client,
}

impl Client {
    /// Repository contents operations.
    pub fn contents(&self) -> Contents<'_> {
        Contents { client: self }
    }
}

impl Contents<'_> {
    /// Get a file's metadata and base64 content.
    ///
    /// `git_ref` selects the branch, tag, or commit; `None` uses the
    /// default branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository reference cannot be resolved or
    /// the call fails.
    pub async fn get(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<FileContent, Error> {
        let mut builder =
            RequestDescriptor::get(format!("{}/contents/{path}", repo.resolve()?));
        if let Some(r) = git_ref {
            builder = builder.query("ref", r);
        }
        let desc = builder.build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Get a file's raw bytes, using raw media-type negotiation instead of
    /// the JSON envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository reference cannot be resolved or
    /// the call fails.
    pub async fn get_raw(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<Vec<u8>, Error> {
        let mut builder = RequestDescriptor::get(format!("{}/contents/{path}", repo.resolve()?))
            .accept(MediaType::Raw);
        if let Some(r) = git_ref {
            builder = builder.query("ref", r);
        }
        let desc = builder.build()?;
        Ok(self.client.invoke_bytes(&desc).await?)
    }

    /// Create or update a file. The bytes are base64-encoded for the wire.
    ///
    /// Updating an existing file requires its current blob `sha`; pass
    /// `None` when creating.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository reference cannot be resolved or
    /// the call fails.
    pub async fn put_file(
        &self,
        repo: &RepoRef,
        path: &str,
        message: &str,
        data: &[u8],
        sha: Option<&str>,
        branch: Option<&str>,
    ) -> Result<FileCommit, Error> {
        let mut body = json!({
            "message": message,
            "content": BASE64.encode(data),
        });
        if let Some(sha) = sha {
            body["sha"] = json!(sha);
        }
        if let Some(branch) = branch {
            body["branch"] = json!(branch);
        }
        let desc = RequestDescriptor::put(format!("{}/contents/{path}", repo.resolve()?))
            .body(body)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Delete a file. Consults the confirmation policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy denies the deletion or the call
    /// fails.
    pub async fn delete_file(
        &self,
        repo: &RepoRef,
        path: &str,
        message: &str,
        sha: &str,
        branch: Option<&str>,
        confirm: &ConfirmPolicy,
    ) -> Result<FileCommit, Error> {
        let repo_path = repo.resolve()?;
        confirm.check(&format!("delete file {path} from {repo_path}"))?;
        let mut body = json!({ "message": message, "sha": sha });
        if let Some(branch) = branch {
            body["branch"] = json!(branch);
        }
        let desc = RequestDescriptor::delete(format!("{repo_path}/contents/{path}"))
            .body(body)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_file(content: Option<&str>) -> FileContent {
        FileContent {
            name: "README.md".to_string(),
            path: "README.md".to_string(),
            sha: "3d21ec53a331a6f037a91c368710b99387d012c1".to_string(),
            size: 14,
            content: content.map(String::from),
            encoding: content.map(|_| "base64".to_string()),
            download_url: None,
        }
    }

    #[test]
    fn test_should_decode_base64_content() {
        let file = sample_file(Some("IyBvY3RvcmVzdAo="));
        assert_eq!(file.decoded_content().unwrap(), b"# octorest\n");
    }

    #[test]
    fn test_should_decode_content_with_line_wrapping() {
        let file = sample_file(Some("IyBvY3Rv\ncmVzdAo=\n"));
        assert_eq!(file.decoded_content().unwrap(), b"# octorest\n");
    }

    #[test]
    fn test_should_fail_decoding_when_content_missing() {
        let file = sample_file(None);
        let err = file.decoded_content().unwrap_err();
        assert!(matches!(err, ContentDecodeError::Missing));
    }

    #[test]
    fn test_should_deserialize_file_commit() {
        let json = r#"{
            "content": {
                "name": "hello.txt",
                "path": "docs/hello.txt",
                "sha": "95b966ae1c166bd92f8ae7d1c313e738c731dfc3",
                "size": 9,
                "download_url": "https://raw.githubusercontent.com/octo/sdk/main/docs/hello.txt"
            },
            "commit": {
                "sha": "7638417db6d59f3c431d3e1f261cc637155684cd",
                "url": "https://api.github.com/repos/octo/sdk/git/commits/7638417db6d59f3c431d3e1f261cc637155684cd"
            }
        }"#;
        let commit: FileCommit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.commit.sha, "7638417db6d59f3c431d3e1f261cc637155684cd");
        assert_eq!(commit.content.unwrap().path, "docs/hello.txt");
    }
}
