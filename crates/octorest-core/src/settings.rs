//! Client settings.
//!
//! Settings are resolved once, at client construction time, and are
//! immutable afterwards: the API layer reads them but never writes them
//! back. Values come from an optional YAML file with environment-variable
//! overrides on top.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;
use crate::instance::GITHUB_COM;

/// Settings directory path (usually `~/.config/octorest`).
pub fn settings_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OCTOREST_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("octorest")
        },
        |d| d.join("octorest"),
    )
}

/// Immutable client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// GitHub hostname to target.
    pub host: String,
    /// Default `OWNER/NAME` used when a call does not name a repository.
    pub default_repo: Option<String>,
    /// Proxy URL for outbound requests.
    pub proxy: Option<String>,
    /// Whether invocation telemetry is emitted.
    pub telemetry: bool,
    /// Page size requested from list endpoints (GitHub caps this at 100).
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: GITHUB_COM.to_string(),
            default_repo: None,
            proxy: None,
            telemetry: true,
            page_size: 30,
        }
    }
}

impl Settings {
    /// Load settings from the default location, applying env overrides.
    ///
    /// A missing file yields the defaults; a present but unparsable file
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, SettingsError> {
        let path = settings_dir().join("settings.yml");
        tracing::debug!(path = %path.display(), "loading settings");
        let mut settings = Self::load_file(&path)?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Load settings from a specific file, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("OCTOREST_HOST")
            && !host.is_empty()
        {
            self.host = host;
        }
        if let Ok(proxy) = std::env::var("OCTOREST_PROXY")
            && !proxy.is_empty()
        {
            self.proxy = Some(proxy);
        }
        if std::env::var("OCTOREST_NO_TELEMETRY").is_ok() {
            self.telemetry = false;
        }
    }

    /// Override the target host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the default repository.
    #[must_use]
    pub fn with_default_repo(mut self, nwo: impl Into<String>) -> Self {
        self.default_repo = Some(nwo.into());
        self
    }

    /// Override the page size.
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Disable telemetry emission.
    #[must_use]
    pub fn without_telemetry(mut self) -> Self {
        self.telemetry = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_should_default_to_github_com() {
        let settings = Settings::default();
        assert_eq!(settings.host, "github.com");
        assert_eq!(settings.page_size, 30);
        assert!(settings.telemetry);
        assert!(settings.default_repo.is_none());
        assert!(settings.proxy.is_none());
    }

    #[test]
    fn test_should_load_missing_file_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_file(&dir.path().join("settings.yml")).unwrap();
        assert_eq!(settings.host, "github.com");
    }

    #[test]
    fn test_should_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "host: ghe.example.com").unwrap();
        writeln!(f, "default_repo: octo/sdk").unwrap();
        writeln!(f, "page_size: 100").unwrap();
        writeln!(f, "telemetry: false").unwrap();

        let settings = Settings::load_file(&path).unwrap();
        assert_eq!(settings.host, "ghe.example.com");
        assert_eq!(settings.default_repo, Some("octo/sdk".to_string()));
        assert_eq!(settings.page_size, 100);
        assert!(!settings.telemetry);
    }

    #[test]
    fn test_should_treat_empty_file_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        std::fs::write(&path, "  \n").unwrap();
        let settings = Settings::load_file(&path).unwrap();
        assert_eq!(settings.host, "github.com");
    }

    #[test]
    fn test_should_reject_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        std::fs::write(&path, "host: [unclosed").unwrap();
        assert!(Settings::load_file(&path).is_err());
    }

    #[test]
    fn test_should_apply_builder_overrides() {
        let settings = Settings::default()
            .with_host("ghe.io")
            .with_default_repo("org/repo")
            .with_page_size(50)
            .without_telemetry();
        assert_eq!(settings.host, "ghe.io");
        assert_eq!(settings.default_repo, Some("org/repo".to_string()));
        assert_eq!(settings.page_size, 50);
        assert!(!settings.telemetry);
    }
}
