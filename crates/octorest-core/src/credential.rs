//! Credential resolution and OS keyring storage.
//!
//! Tokens are opaque to the SDK. They are wrapped in [`SecretString`] so
//! that `Debug` output and logs never leak them. Resolution order:
//! an explicitly supplied token, then `GH_TOKEN`/`GITHUB_TOKEN` from the
//! environment, then the OS keyring entry for the target hostname.

use anyhow::{Context, Result};
use secrecy::SecretString;

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Supplied directly by the caller.
    Explicit,
    /// Read from `GH_TOKEN` or `GITHUB_TOKEN`.
    Env,
    /// Read from the OS keyring.
    Keyring,
}

/// Resolve a token for a hostname.
///
/// Returns `None` when no credential is available; callers then proceed
/// unauthenticated (subject to the lower anonymous rate limit).
pub fn resolve_token(hostname: &str, explicit: Option<SecretString>) -> Option<(SecretString, TokenSource)> {
    if let Some(token) = explicit {
        return Some((token, TokenSource::Explicit));
    }
    if let Some(token) = env_token() {
        return Some((token, TokenSource::Env));
    }
    keyring_token(hostname)
        .ok()
        .flatten()
        .map(|t| (t, TokenSource::Keyring))
}

/// Read a token from `GH_TOKEN` or `GITHUB_TOKEN`.
pub fn env_token() -> Option<SecretString> {
    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            return Some(token.into());
        }
    }
    None
}

/// Retrieve a token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the keyring backend fails; a missing entry is `None`.
pub fn keyring_token(hostname: &str) -> Result<Option<SecretString>> {
    let entry = keyring_entry(hostname)?;
    match entry.get_password() {
        Ok(token) => Ok(Some(token.into())),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("keyring error: {e}")),
    }
}

/// Store a token in the OS keyring.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn store_token(hostname: &str, token: &str) -> Result<()> {
    let entry = keyring_entry(hostname)?;
    entry
        .set_password(token)
        .context("failed to store token in keyring")?;
    Ok(())
}

/// Delete a token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn delete_token(hostname: &str) -> Result<()> {
    let entry = keyring_entry(hostname)?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("keyring error: {e}")),
    }
}

fn keyring_entry(hostname: &str) -> Result<keyring::Entry> {
    let service = format!("octorest:{hostname}");
    keyring::Entry::new(&service, "oauth_token").context("failed to create keyring entry")
}

/// Mask a token for display, keeping the prefix before the last underscore.
pub fn mask_token(token: &str) -> String {
    if let Some(idx) = token.rfind('_') {
        let prefix = &token[..=idx];
        let mask_len = token.len() - prefix.len();
        format!("{prefix}{}", "*".repeat(mask_len))
    } else {
        "*".repeat(token.len())
    }
}
