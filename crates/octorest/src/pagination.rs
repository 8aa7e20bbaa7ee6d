//! Lazy traversal of multi-page list results.
//!
//! GitHub list endpoints return one bounded page plus a `Link` header
//! pointing at the next page while more data exists. [`Paginator`] follows
//! those links on demand: nothing is fetched until polled, consuming a
//! prefix fetches no further pages, and dropping the paginator stops the
//! traversal. The sequence is finite and non-restartable.

use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::client::{Client, ResponseMeta};
use crate::descriptor::RequestDescriptor;
use crate::errors::ApiError;

/// One page of a list result.
#[derive(Debug)]
#[non_exhaustive]
pub struct Page<T> {
    /// Items in server-returned order.
    pub items: Vec<T>,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// Response metadata for this page.
    pub meta: ResponseMeta,
}

/// Lazy, finite, non-restartable sequence of list items.
///
/// Pages concatenate in server order. Use [`next_page`](Self::next_page)
/// for page-wise consumption or [`next_item`](Self::next_item) for
/// item-wise consumption; mixing the two on one paginator is not
/// supported.
#[derive(Debug)]
pub struct Paginator<'a, T> {
    client: &'a Client,
    next: Option<RequestDescriptor>,
    buffer: VecDeque<T>,
}

impl<'a, T: DeserializeOwned> Paginator<'a, T> {
    pub(crate) fn new(client: &'a Client, descriptor: RequestDescriptor) -> Self {
        Self {
            client,
            next: Some(descriptor),
            buffer: VecDeque::new(),
        }
    }

    /// Whether every page has been fetched.
    pub fn is_exhausted(&self) -> bool {
        self.next.is_none() && self.buffer.is_empty()
    }

    /// Fetch the next page, or `None` after the last page.
    ///
    /// Exactly one HTTP request is issued per call until exhaustion; after
    /// that, calls are free and return `None`.
    ///
    /// # Errors
    ///
    /// Propagates invoker errors; the paginator stays positioned on the
    /// failed page, so a transient error can be retried by calling again.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, ApiError> {
        let Some(descriptor) = self.next.take() else {
            return Ok(None);
        };
        match self.client.fetch_page::<T>(&descriptor).await {
            Ok(page) => {
                self.next = page.next.as_deref().map(|url| descriptor.for_page(url));
                Ok(Some(page.items))
            }
            Err(e) => {
                self.next = Some(descriptor);
                Err(e)
            }
        }
    }

    /// Fetch the next single item, pulling pages only as needed.
    ///
    /// # Errors
    ///
    /// Propagates invoker errors from the underlying page fetch.
    pub async fn next_item(&mut self) -> Result<Option<T>, ApiError> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            match self.next_page().await? {
                // A page may legitimately be empty; keep following links.
                Some(items) => self.buffer.extend(items),
                None => return Ok(None),
            }
        }
    }

    /// Drain the remaining pages into one vector, in server order.
    ///
    /// # Errors
    ///
    /// Propagates the first invoker error encountered.
    pub async fn collect_all(mut self) -> Result<Vec<T>, ApiError> {
        let mut all: Vec<T> = self.buffer.drain(..).collect();
        while let Some(items) = self.next_page().await? {
            all.extend(items);
        }
        Ok(all)
    }
}

/// Regex for parsing RFC 5988 `Link` header relations.
static LINK_REL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]+)>;\s*rel="([^"]+)""#).expect("LINK_REL_RE is a valid regex")
});

/// Parse the `Link` header to extract the `next` page URL.
pub(crate) fn parse_link_next(headers: &HeaderMap) -> Option<String> {
    let link_header = headers.get("link")?.to_str().ok()?;

    for cap in LINK_REL_RE.captures_iter(link_header) {
        if cap.get(2).is_some_and(|m| m.as_str() == "next") {
            return cap.get(1).map(|m| m.as_str().to_string());
        }
    }
    None
}
