//! Pull request operations.

use octorest_core::RepoRef;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{SimpleUser, to_body};
use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::pagination::Paginator;

/// A pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Numeric id.
    pub id: u64,
    /// PR number within the repository.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: Option<String>,
    /// `open` or `closed`.
    pub state: String,
    /// Whether the PR is a draft.
    #[serde(default)]
    pub draft: bool,
    /// Author.
    pub user: Option<SimpleUser>,
    /// Source branch.
    pub head: BranchInfo,
    /// Target branch.
    pub base: BranchInfo,
    /// Whether the PR has been merged.
    pub merged: Option<bool>,
    /// Whether the PR can be merged cleanly.
    pub mergeable: Option<bool>,
    /// Added line count.
    pub additions: Option<u64>,
    /// Deleted line count.
    pub deletions: Option<u64>,
    /// Changed file count.
    pub changed_files: Option<u64>,
}

/// One side of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Branch name.
    #[serde(rename = "ref")]
    pub branch: String,
    /// Head commit SHA.
    pub sha: String,
    /// `owner:branch` label.
    pub label: Option<String>,
}

/// Parameters for opening a pull request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPullRequest {
    /// Title.
    pub title: String,
    /// Source branch (or `owner:branch` for forks).
    pub head: String,
    /// Target branch.
    pub base: String,
    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Open as draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

/// How to merge a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMethod {
    /// Merge commit.
    Merge,
    /// Squash into one commit.
    Squash,
    /// Rebase onto the base branch.
    Rebase,
}

/// Result of a merge call.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeResult {
    /// SHA of the merge commit.
    pub sha: Option<String>,
    /// Whether the merge happened.
    pub merged: bool,
    /// Server message.
    pub message: Option<String>,
}

/// Pull request service.
#[derive(Debug)]
pub struct Pulls<'a> {
    client: &'a Client,
}

impl Client {
    /// Pull request operations.
    pub fn pulls(&self) -> Pulls<'_> {
        Pulls { client: self }
    }
}

impl Pulls<'_> {
    /// Get a pull request by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn get(&self, repo: &RepoRef, number: u64) -> Result<PullRequest, Error> {
        let desc = RequestDescriptor::get(format!("{}/pulls/{number}", repo.resolve()?)).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Lazily list pull requests, optionally filtered by state.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved.
    pub fn list(
        &self,
        repo: &RepoRef,
        state: Option<&str>,
    ) -> Result<Paginator<'_, PullRequest>, Error> {
        let mut builder = RequestDescriptor::get(format!("{}/pulls", repo.resolve()?))
            .query("per_page", self.client.page_size().to_string());
        if let Some(state) = state {
            builder = builder.query("state", state);
        }
        Ok(self.client.paginate(builder.build()?))
    }

    /// Open a pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn create(&self, repo: &RepoRef, params: &NewPullRequest) -> Result<PullRequest, Error> {
        let desc = RequestDescriptor::post(format!("{}/pulls", repo.resolve()?))
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Merge a pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails (including a 405 when the PR is not mergeable).
    pub async fn merge(
        &self,
        repo: &RepoRef,
        number: u64,
        method: MergeMethod,
        commit_message: Option<&str>,
    ) -> Result<MergeResult, Error> {
        let mut body = json!({ "merge_method": method });
        if let Some(message) = commit_message {
            body["commit_message"] = json!(message);
        }
        let desc = RequestDescriptor::put(format!("{}/pulls/{number}/merge", repo.resolve()?))
            .body(body)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_pull_request() {
        let json = r#"{
            "id": 1,
            "number": 1347,
            "title": "Amazing new feature",
            "body": "Please pull these awesome changes in!",
            "state": "open",
            "draft": false,
            "user": {"login": "octocat", "id": 1},
            "head": {"ref": "new-topic", "sha": "6dcb09b5b5", "label": "octocat:new-topic"},
            "base": {"ref": "main", "sha": "6dcb09b5b6", "label": "octocat:main"},
            "merged": false,
            "mergeable": true,
            "additions": 100,
            "deletions": 3,
            "changed_files": 5
        }"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();
        assert_eq!(pr.number, 1347);
        assert_eq!(pr.head.branch, "new-topic");
        assert_eq!(pr.base.branch, "main");
        assert_eq!(pr.additions, Some(100));
        assert!(!pr.draft);
    }

    #[test]
    fn test_should_serialize_merge_method_snake_case() {
        assert_eq!(serde_json::to_value(MergeMethod::Squash).unwrap(), "squash");
        assert_eq!(serde_json::to_value(MergeMethod::Merge).unwrap(), "merge");
        assert_eq!(serde_json::to_value(MergeMethod::Rebase).unwrap(), "rebase");
    }

    #[test]
    fn test_should_serialize_new_pull_request() {
        let params = NewPullRequest {
            title: "Amazing new feature".to_string(),
            head: "octocat:new-topic".to_string(),
            base: "main".to_string(),
            draft: Some(true),
            body: None,
        };
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["head"], "octocat:new-topic");
        assert_eq!(body["draft"], true);
        assert!(body.get("body").is_none());
    }

    #[test]
    fn test_should_deserialize_merge_result() {
        let json = r#"{"sha": "6dcb09b5b5", "merged": true, "message": "Pull Request successfully merged"}"#;
        let result: MergeResult = serde_json::from_str(json).unwrap();
        assert!(result.merged);
        assert_eq!(result.sha.as_deref(), Some("6dcb09b5b5"));
    }
}
