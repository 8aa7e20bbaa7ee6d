//! Typed per-resource services.
//!
//! Each service is a thin borrow of the [`Client`](crate::Client): it
//! resolves parameters into request descriptors, decodes the JSON into the
//! structs defined here, and consults the caller's
//! [`ConfirmPolicy`](octorest_core::ConfirmPolicy) before destructive
//! calls. All transport concerns, pagination, retry, and rate limiting
//! live in the invoker, never here.

pub mod contents;
pub mod gists;
pub mod git_refs;
pub mod issues;
pub mod labels;
pub mod milestones;
pub mod pulls;
pub mod reactions;
pub mod releases;
pub mod repos;

use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, Error};

/// Serialize request parameters into a JSON body.
pub(crate) fn to_body<T: Serialize>(params: &T) -> Result<serde_json::Value, Error> {
    Ok(serde_json::to_value(params).map_err(ApiError::from)?)
}

/// A user or organization as embedded in other resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleUser {
    /// Login name.
    pub login: String,
    /// Numeric id.
    pub id: u64,
    /// Account type (`User` or `Organization`).
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_simple_user() {
        let json = r#"{"login": "octocat", "id": 1, "type": "User"}"#;
        let user: SimpleUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.id, 1);
        assert_eq!(user.account_type, Some("User".to_string()));
    }

    #[test]
    fn test_should_deserialize_user_without_type() {
        let json = r#"{"login": "octocat", "id": 1}"#;
        let user: SimpleUser = serde_json::from_str(json).unwrap();
        assert!(user.account_type.is_none());
    }
}
