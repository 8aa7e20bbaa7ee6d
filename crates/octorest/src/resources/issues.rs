//! Issue operations.

use octorest_core::RepoRef;
use serde::{Deserialize, Serialize};

use super::labels::Label;
use super::milestones::Milestone;
use super::{SimpleUser, to_body};
use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::pagination::Paginator;

/// An issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Numeric id.
    pub id: u64,
    /// Issue number within the repository.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: Option<String>,
    /// `open` or `closed`.
    pub state: String,
    /// Author.
    pub user: Option<SimpleUser>,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Milestone, if assigned.
    pub milestone: Option<Milestone>,
    /// Comment count.
    pub comments: Option<u64>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last-update timestamp.
    pub updated_at: Option<String>,
    /// Close timestamp.
    pub closed_at: Option<String>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueComment {
    /// Numeric id.
    pub id: u64,
    /// Body text.
    pub body: String,
    /// Author.
    pub user: Option<SimpleUser>,
    /// Creation timestamp.
    pub created_at: Option<String>,
}

/// Parameters for creating an issue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewIssue {
    /// Title.
    pub title: String,
    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Label names to apply.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Logins to assign.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    /// Milestone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

/// Parameters for updating an issue; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateIssue {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// `open` or `closed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Replacement label set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// Issue service.
#[derive(Debug)]
pub struct Issues<'a> {
    client: &'a Client,
}

impl Client {
    /// Issue operations.
    pub fn issues(&self) -> Issues<'_> {
        Issues { client: self }
    }
}

impl Issues<'_> {
    /// Get an issue by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn get(&self, repo: &RepoRef, number: u64) -> Result<Issue, Error> {
        let desc = RequestDescriptor::get(format!("{}/issues/{number}", repo.resolve()?)).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Lazily list issues, optionally filtered by state and labels.
    ///
    /// `labels` is a comma-separated list of label names, as the API
    /// expects.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved.
    pub fn list(
        &self,
        repo: &RepoRef,
        state: Option<&str>,
        labels: Option<&str>,
    ) -> Result<Paginator<'_, Issue>, Error> {
        let mut builder = RequestDescriptor::get(format!("{}/issues", repo.resolve()?))
            .query("per_page", self.client.page_size().to_string());
        if let Some(state) = state {
            builder = builder.query("state", state);
        }
        if let Some(labels) = labels {
            builder = builder.query("labels", labels);
        }
        Ok(self.client.paginate(builder.build()?))
    }

    /// Create an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn create(&self, repo: &RepoRef, params: &NewIssue) -> Result<Issue, Error> {
        let desc = RequestDescriptor::post(format!("{}/issues", repo.resolve()?))
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Update an issue (including closing it via `state`).
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn update(
        &self,
        repo: &RepoRef,
        number: u64,
        params: &UpdateIssue,
    ) -> Result<Issue, Error> {
        let desc = RequestDescriptor::patch(format!("{}/issues/{number}", repo.resolve()?))
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Lazily list comments on an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved.
    pub fn list_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Paginator<'_, IssueComment>, Error> {
        let desc = RequestDescriptor::get(format!("{}/issues/{number}/comments", repo.resolve()?))
            .query("per_page", self.client.page_size().to_string())
            .build()?;
        Ok(self.client.paginate(desc))
    }

    /// Add a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, Error> {
        let desc = RequestDescriptor::post(format!("{}/issues/{number}/comments", repo.resolve()?))
            .body(serde_json::json!({ "body": body }))
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_issue() {
        let json = r#"{
            "id": 1,
            "number": 1347,
            "title": "Found a bug",
            "body": "I'm having a problem with this.",
            "state": "open",
            "user": {"login": "octocat", "id": 1},
            "labels": [{"id": 1, "name": "bug", "color": "f29513", "description": null}],
            "milestone": null,
            "comments": 0,
            "created_at": "2026-04-22T13:33:48Z",
            "updated_at": "2026-04-22T13:33:48Z",
            "closed_at": null
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, 1347);
        assert_eq!(issue.state, "open");
        assert_eq!(issue.labels[0].name, "bug");
        assert!(issue.closed_at.is_none());
    }

    #[test]
    fn test_should_deserialize_minimal_issue() {
        let json = r#"{"id": 1, "number": 2, "title": "t", "state": "closed"}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.labels.is_empty());
        assert!(issue.user.is_none());
    }

    #[test]
    fn test_should_serialize_new_issue_without_empty_collections() {
        let params = NewIssue {
            title: "Found a bug".to_string(),
            ..NewIssue::default()
        };
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body, serde_json::json!({"title": "Found a bug"}));
    }

    #[test]
    fn test_should_serialize_state_change() {
        let params = UpdateIssue {
            state: Some("closed".to_string()),
            ..UpdateIssue::default()
        };
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body, serde_json::json!({"state": "closed"}));
    }
}
