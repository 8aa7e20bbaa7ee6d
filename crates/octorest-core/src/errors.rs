//! Core error types.

/// Errors originating from core operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Settings file read/parse error.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A destructive operation was denied by the confirmation policy.
    #[error("operation not confirmed: {0}")]
    Denied(String),

    /// A required value was not found.
    #[error("{0}")]
    NotFound(String),
}

/// Settings-specific errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("failed to read settings file {path}: {source}")]
    ReadFile {
        /// Path of the settings file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the settings file.
    #[error("failed to parse settings: {0}")]
    Parse(String),

    /// Missing required setting.
    #[error("missing required setting: {0}")]
    Missing(String),
}
