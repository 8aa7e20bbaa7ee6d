//! Accept-header media type negotiation.
//!
//! GitHub returns alternate representations of some resources (raw file
//! bytes, rendered HTML, …) depending on the Accept header. The invoker
//! passes the chosen value through unchanged; only the default structured
//! JSON case is decoded by the invoker itself.

use std::fmt;

/// Requested response representation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MediaType {
    /// Structured JSON (`application/vnd.github+json`). The default; the
    /// invoker decodes this for the caller.
    #[default]
    Json,
    /// Raw contents (`application/vnd.github.raw+json`).
    Raw,
    /// Text-only representation.
    Text,
    /// Rendered HTML representation.
    Html,
    /// Both raw and rendered fields.
    Full,
    /// Any other Accept value, passed through verbatim.
    Custom(String),
}

impl MediaType {
    /// The Accept header value for this media type.
    pub fn header_value(&self) -> &str {
        match self {
            Self::Json => "application/vnd.github+json",
            Self::Raw => "application/vnd.github.raw+json",
            Self::Text => "application/vnd.github.text+json",
            Self::Html => "application/vnd.github.html+json",
            Self::Full => "application/vnd.github.full+json",
            Self::Custom(v) => v,
        }
    }

    /// Whether the invoker should decode the body as JSON.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_value())
    }
}
