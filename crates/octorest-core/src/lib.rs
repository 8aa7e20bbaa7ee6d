//! Core types and utilities for the octorest GitHub REST SDK.
//!
//! This crate provides the foundational abstractions shared by the API layer:
//! - [`Settings`] for immutable client configuration
//! - [`Repo`] and [`RepoRef`] for repository identification
//! - Credential resolution backed by env vars and the OS keyring
//! - [`ConfirmPolicy`] consulted before destructive operations
//! - GitHub instance/hostname handling

pub mod confirm;
pub mod credential;
pub mod errors;
pub mod instance;
pub mod reference;
pub mod repo;
pub mod settings;

pub use confirm::ConfirmPolicy;
pub use errors::CoreError;
pub use reference::RepoRef;
pub use repo::Repo;
pub use settings::Settings;
