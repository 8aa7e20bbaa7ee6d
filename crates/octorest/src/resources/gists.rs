//! Gist operations.

use std::collections::BTreeMap;

use octorest_core::ConfirmPolicy;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::SimpleUser;
use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::pagination::Paginator;

/// A gist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gist {
    /// Gist id (hex string).
    pub id: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the gist is public.
    pub public: bool,
    /// Files keyed by filename.
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
    /// Web URL.
    pub html_url: String,
    /// Owner; absent for anonymous gists.
    pub owner: Option<SimpleUser>,
}

/// One file inside a gist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistFile {
    /// File name.
    pub filename: String,
    /// Content; only present on single-gist fetches, and elided for large
    /// files (see `truncated`).
    pub content: Option<String>,
    /// Raw download URL.
    pub raw_url: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
    /// Whether `content` was truncated.
    #[serde(default)]
    pub truncated: bool,
}

/// Gist service.
#[derive(Debug)]
pub struct Gists<'a> {
    client: &'a Client,
}

impl Client {
    /// Gist operations.
    pub fn gists(&self) -> Gists<'_> {
        Gists { client: self }
    }
}

impl Gists<'_> {
    /// Get a gist by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, id: &str) -> Result<Gist, Error> {
        let desc = RequestDescriptor::get(format!("gists/{id}")).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Lazily list the authenticated user's gists.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be built.
    pub fn list(&self) -> Result<Paginator<'_, Gist>, Error> {
        let desc = RequestDescriptor::get("gists")
            .query("per_page", self.client.page_size().to_string())
            .build()?;
        Ok(self.client.paginate(desc))
    }

    /// Lazily list a user's public gists.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be built.
    pub fn list_for_user(&self, username: &str) -> Result<Paginator<'_, Gist>, Error> {
        let desc = RequestDescriptor::get(format!("users/{username}/gists"))
            .query("per_page", self.client.page_size().to_string())
            .build()?;
        Ok(self.client.paginate(desc))
    }

    /// Create a gist from named file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create(
        &self,
        description: Option<&str>,
        public: bool,
        files: &BTreeMap<String, String>,
    ) -> Result<Gist, Error> {
        let files_body: serde_json::Map<String, serde_json::Value> = files
            .iter()
            .map(|(name, content)| (name.clone(), json!({ "content": content })))
            .collect();
        let mut body = json!({ "public": public, "files": files_body });
        if let Some(description) = description {
            body["description"] = json!(description);
        }
        let desc = RequestDescriptor::post("gists").body(body).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Update a gist's description or file contents.
    ///
    /// A `None` content deletes the named file.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn update(
        &self,
        id: &str,
        description: Option<&str>,
        files: &BTreeMap<String, Option<String>>,
    ) -> Result<Gist, Error> {
        let files_body: serde_json::Map<String, serde_json::Value> = files
            .iter()
            .map(|(name, content)| {
                let value = match content {
                    Some(content) => json!({ "content": content }),
                    None => serde_json::Value::Null,
                };
                (name.clone(), value)
            })
            .collect();
        let mut body = json!({ "files": files_body });
        if let Some(description) = description {
            body["description"] = json!(description);
        }
        let desc = RequestDescriptor::patch(format!("gists/{id}")).body(body).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Delete a gist. Consults the confirmation policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy denies the deletion or the call
    /// fails.
    pub async fn delete(&self, id: &str, confirm: &ConfirmPolicy) -> Result<(), Error> {
        confirm.check(&format!("delete gist {id}"))?;
        let desc = RequestDescriptor::delete(format!("gists/{id}")).build()?;
        self.client.invoke_status(&desc).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_gist() {
        let json = r#"{
            "id": "aa5a315d61ae9438b18d",
            "description": "Hello World Examples",
            "public": true,
            "html_url": "https://gist.github.com/aa5a315d61ae9438b18d",
            "owner": {"login": "octocat", "id": 1},
            "files": {
                "hello_world.rb": {
                    "filename": "hello_world.rb",
                    "content": "puts \"Hello\"",
                    "raw_url": "https://gist.githubusercontent.com/raw/hello_world.rb",
                    "size": 12,
                    "truncated": false
                }
            }
        }"#;
        let gist: Gist = serde_json::from_str(json).unwrap();
        assert_eq!(gist.id, "aa5a315d61ae9438b18d");
        assert!(gist.public);
        let file = &gist.files["hello_world.rb"];
        assert_eq!(file.filename, "hello_world.rb");
        assert!(!file.truncated);
    }

    #[test]
    fn test_should_deserialize_gist_listing_without_content() {
        let json = r#"{
            "id": "abc",
            "description": null,
            "public": false,
            "html_url": "https://gist.github.com/abc",
            "files": {"notes.md": {"filename": "notes.md"}}
        }"#;
        let gist: Gist = serde_json::from_str(json).unwrap();
        assert!(gist.owner.is_none());
        assert!(gist.files["notes.md"].content.is_none());
    }
}
