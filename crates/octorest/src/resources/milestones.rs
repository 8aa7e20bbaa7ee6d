//! Milestone operations.

use octorest_core::{ConfirmPolicy, RepoRef};
use serde::{Deserialize, Serialize};

use super::to_body;
use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::pagination::Paginator;

/// A milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Numeric id.
    pub id: u64,
    /// Milestone number within the repository.
    pub number: u64,
    /// Title.
    pub title: String,
    /// `open` or `closed`.
    pub state: String,
    /// Description.
    pub description: Option<String>,
    /// Due date.
    pub due_on: Option<String>,
    /// Open issue count.
    pub open_issues: Option<u64>,
    /// Closed issue count.
    pub closed_issues: Option<u64>,
}

/// Parameters for creating or updating a milestone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MilestoneParams {
    /// Title; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `open` or `closed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
}

/// Milestone service.
#[derive(Debug)]
pub struct Milestones<'a> {
    client: &'a Client,
}

impl Client {
    /// Milestone operations.
    pub fn milestones(&self) -> Milestones<'_> {
        Milestones { client: self }
    }
}

impl Milestones<'_> {
    /// Lazily list milestones, optionally filtered by state.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved.
    pub fn list(
        &self,
        repo: &RepoRef,
        state: Option<&str>,
    ) -> Result<Paginator<'_, Milestone>, Error> {
        let mut builder = RequestDescriptor::get(format!("{}/milestones", repo.resolve()?))
            .query("per_page", self.client.page_size().to_string());
        if let Some(state) = state {
            builder = builder.query("state", state);
        }
        Ok(self.client.paginate(builder.build()?))
    }

    /// Get a milestone by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn get(&self, repo: &RepoRef, number: u64) -> Result<Milestone, Error> {
        let desc =
            RequestDescriptor::get(format!("{}/milestones/{number}", repo.resolve()?)).build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Create a milestone.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn create(&self, repo: &RepoRef, params: &MilestoneParams) -> Result<Milestone, Error> {
        let desc = RequestDescriptor::post(format!("{}/milestones", repo.resolve()?))
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Update a milestone.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the call
    /// fails.
    pub async fn update(
        &self,
        repo: &RepoRef,
        number: u64,
        params: &MilestoneParams,
    ) -> Result<Milestone, Error> {
        let desc = RequestDescriptor::patch(format!("{}/milestones/{number}", repo.resolve()?))
            .body(to_body(params)?)
            .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Delete a milestone. Consults the confirmation policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy denies the deletion or the call
    /// fails.
    pub async fn delete(
        &self,
        repo: &RepoRef,
        number: u64,
        confirm: &ConfirmPolicy,
    ) -> Result<(), Error> {
        let path = repo.resolve()?;
        confirm.check(&format!("delete milestone {number} from {path}"))?;
        let desc = RequestDescriptor::delete(format!("{path}/milestones/{number}")).build()?;
        self.client.invoke_status(&desc).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_milestone() {
        let json = r#"{
            "id": 1002604,
            "number": 1,
            "title": "v1.0",
            "state": "open",
            "description": "Tracking milestone for version 1.0",
            "due_on": "2026-10-09T23:39:01Z",
            "open_issues": 4,
            "closed_issues": 8
        }"#;
        let milestone: Milestone = serde_json::from_str(json).unwrap();
        assert_eq!(milestone.number, 1);
        assert_eq!(milestone.title, "v1.0");
        assert_eq!(milestone.open_issues, Some(4));
    }

    #[test]
    fn test_should_serialize_only_set_params() {
        let params = MilestoneParams {
            title: Some("v2.0".to_string()),
            ..MilestoneParams::default()
        };
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body, serde_json::json!({"title": "v2.0"}));
    }
}
