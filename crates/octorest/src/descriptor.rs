//! Request descriptors.
//!
//! A [`RequestDescriptor`] captures one HTTP call before execution: verb,
//! path fragment, ordered query parameters, optional JSON body, extra
//! headers, accept override, and an optional per-call credential. It is
//! immutable once built; retries and pagination derive fresh descriptors
//! instead of mutating one in flight.

use reqwest::Method;
use secrecy::SecretString;
use serde_json::Value;

use crate::media::MediaType;

/// An immutable description of a single HTTP call.
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: Vec<(String, String)>,
    accept: MediaType,
    token: Option<SecretString>,
}

impl std::fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("accept", &self.accept)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl RequestDescriptor {
    /// Start building a GET request.
    pub fn get(path: impl Into<String>) -> Builder {
        Builder::new(Method::GET, path.into())
    }

    /// Start building a POST request.
    pub fn post(path: impl Into<String>) -> Builder {
        Builder::new(Method::POST, path.into())
    }

    /// Start building a PATCH request.
    pub fn patch(path: impl Into<String>) -> Builder {
        Builder::new(Method::PATCH, path.into())
    }

    /// Start building a PUT request.
    pub fn put(path: impl Into<String>) -> Builder {
        Builder::new(Method::PUT, path.into())
    }

    /// Start building a DELETE request.
    pub fn delete(path: impl Into<String>) -> Builder {
        Builder::new(Method::DELETE, path.into())
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path fragment (or absolute URL for cursor-derived descriptors).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON body, if any.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Extra headers.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Accept media type.
    pub fn accept(&self) -> &MediaType {
        &self.accept
    }

    /// Per-call credential, if any.
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Resolve the full URL against a base URL (with trailing slash).
    ///
    /// Absolute paths (page-cursor URLs) are used as-is; relative fragments
    /// are joined to the base. Query parameters are appended in insertion
    /// order, percent-encoded.
    pub fn url(&self, base: &str) -> String {
        let mut url = if self.path.starts_with("https://") || self.path.starts_with("http://") {
            self.path.clone()
        } else {
            format!("{base}{}", self.path.trim_start_matches('/'))
        };

        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 && !url.contains('?') { '?' } else { '&' };
            url.push(sep);
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// Derive the descriptor for the next page of a list result.
    ///
    /// The cursor URL is absolute and already carries its own query string,
    /// so the derived descriptor drops the original query pairs. Method,
    /// headers, accept, and credential carry over unchanged.
    pub fn for_page(&self, cursor_url: &str) -> Self {
        Self {
            method: self.method.clone(),
            path: cursor_url.to_string(),
            query: Vec::new(),
            body: None,
            headers: self.headers.clone(),
            accept: self.accept.clone(),
            token: self.token.clone(),
        }
    }
}

/// Builder for [`RequestDescriptor`].
#[derive(Debug)]
pub struct Builder {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: Vec<(String, String)>,
    accept: MediaType,
    token: Option<SecretString>,
}

impl Builder {
    fn new(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            accept: MediaType::default(),
            token: None,
        }
    }

    /// Append a query parameter; order is preserved.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append an extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set the Accept media type.
    #[must_use]
    pub fn accept(mut self, accept: MediaType) -> Self {
        self.accept = accept;
        self
    }

    /// Set a per-call credential, overriding the client's token.
    #[must_use]
    pub fn token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Finalize the descriptor.
    ///
    /// # Errors
    ///
    /// Rejects an empty path and a GET request carrying a body.
    pub fn build(self) -> Result<RequestDescriptor, DescriptorError> {
        if self.path.is_empty() {
            return Err(DescriptorError::EmptyPath);
        }
        if self.method == Method::GET && self.body.is_some() {
            return Err(DescriptorError::BodyOnGet);
        }
        Ok(RequestDescriptor {
            method: self.method,
            path: self.path,
            query: self.query,
            body: self.body,
            headers: self.headers,
            accept: self.accept,
            token: self.token,
        })
    }
}

/// Errors from descriptor construction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DescriptorError {
    /// The path fragment was empty.
    #[error("request path must not be empty")]
    EmptyPath,
    /// A GET request carried a body.
    #[error("GET requests must not carry a body")]
    BodyOnGet,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_build_get_descriptor() {
        let desc = RequestDescriptor::get("repos/octo/sdk").build().unwrap();
        assert_eq!(desc.method(), &Method::GET);
        assert_eq!(desc.path(), "repos/octo/sdk");
        assert!(desc.body().is_none());
    }

    #[test]
    fn test_should_reject_empty_path() {
        assert_eq!(
            RequestDescriptor::get("").build().unwrap_err(),
            DescriptorError::EmptyPath,
        );
    }

    #[test]
    fn test_should_reject_body_on_get() {
        let err = RequestDescriptor::get("user")
            .body(json!({"a": 1}))
            .build()
            .unwrap_err();
        assert_eq!(err, DescriptorError::BodyOnGet);
    }

    #[test]
    fn test_should_allow_body_on_post() {
        let desc = RequestDescriptor::post("repos/octo/sdk/issues")
            .body(json!({"title": "bug"}))
            .build()
            .unwrap();
        assert_eq!(desc.body().unwrap()["title"], "bug");
    }

    #[test]
    fn test_should_resolve_relative_url_with_query_in_order() {
        let desc = RequestDescriptor::get("/repos/octo/sdk/issues")
            .query("state", "open")
            .query("per_page", "50")
            .build()
            .unwrap();
        assert_eq!(
            desc.url("https://api.github.com/"),
            "https://api.github.com/repos/octo/sdk/issues?state=open&per_page=50",
        );
    }

    #[test]
    fn test_should_percent_encode_query_values() {
        let desc = RequestDescriptor::get("search/issues")
            .query("q", "label:good first issue")
            .build()
            .unwrap();
        let url = desc.url("https://api.github.com/");
        assert!(url.ends_with("?q=label%3Agood%20first%20issue"));
    }

    #[test]
    fn test_should_pass_absolute_url_through() {
        let desc = RequestDescriptor::get("https://api.github.com/repositories?since=100")
            .build()
            .unwrap();
        assert_eq!(
            desc.url("https://ignored.example.com/"),
            "https://api.github.com/repositories?since=100",
        );
    }

    #[test]
    fn test_should_append_query_to_absolute_url_with_existing_query() {
        let desc = RequestDescriptor::get("https://api.github.com/items?page=2")
            .query("per_page", "10")
            .build()
            .unwrap();
        assert_eq!(
            desc.url("https://ignored.example.com/"),
            "https://api.github.com/items?page=2&per_page=10",
        );
    }

    #[test]
    fn test_should_derive_page_descriptor() {
        let desc = RequestDescriptor::get("repos/octo/sdk/issues")
            .query("state", "open")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .build()
            .unwrap();
        let next = desc.for_page("https://api.github.com/repos/octo/sdk/issues?state=open&page=2");

        assert_eq!(next.method(), &Method::GET);
        assert_eq!(
            next.url("https://api.github.com/"),
            "https://api.github.com/repos/octo/sdk/issues?state=open&page=2",
        );
        assert_eq!(next.headers(), desc.headers());
    }

    #[test]
    fn test_should_redact_token_in_debug() {
        let desc = RequestDescriptor::get("user")
            .token("ghp_secret".into())
            .build()
            .unwrap();
        let debug = format!("{desc:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("ghp_secret"));
    }
}
