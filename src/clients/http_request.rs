//! HTTP methods used by the indexing service.

use std::fmt;

/// HTTP methods supported by the indexing service.
///
/// Each document operation maps to exactly one method; login uses `Post`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read a document.
    Get,
    /// Create a document or log in.
    Post,
    /// Create or replace a document at a known id.
    Put,
    /// Remove a document.
    Delete,
}

impl HttpMethod {
    /// Returns the method as the matching [`reqwest::Method`].
    #[must_use]
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}
