//! Confirmation policy for destructive operations.
//!
//! Resource services consult the policy before issuing deletes and other
//! irreversible calls. The policy lives entirely in the calling layer; the
//! request invoker itself never prompts or blocks on confirmation.

use std::fmt;
use std::sync::Arc;

use crate::errors::CoreError;

/// Decides whether a destructive operation may proceed.
#[derive(Clone)]
pub enum ConfirmPolicy {
    /// Allow every operation without asking.
    AlwaysAllow,
    /// Deny every operation.
    AlwaysDeny,
    /// Ask a caller-supplied callback, passing a description of the
    /// operation (e.g. `"delete repository octo/sdk"`).
    Ask(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl ConfirmPolicy {
    /// Check whether the described operation may proceed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Denied`] when the policy rejects the operation.
    pub fn check(&self, description: &str) -> Result<(), CoreError> {
        let allowed = match self {
            Self::AlwaysAllow => true,
            Self::AlwaysDeny => false,
            Self::Ask(f) => f(description),
        };
        if allowed {
            Ok(())
        } else {
            Err(CoreError::Denied(description.to_string()))
        }
    }
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self::AlwaysAllow
    }
}

impl fmt::Debug for ConfirmPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysAllow => write!(f, "ConfirmPolicy::AlwaysAllow"),
            Self::AlwaysDeny => write!(f, "ConfirmPolicy::AlwaysDeny"),
            Self::Ask(_) => write!(f, "ConfirmPolicy::Ask(..)"),
        }
    }
}
