//! Transport-level error types.
//!
//! A [`TransportError`] means no usable [`Envelope`](crate::clients::Envelope)
//! came back from the server. These errors are always fatal to the enclosing
//! operation: they are never retried, so an unreachable endpoint is not
//! hammered.
//!
//! # Example
//!
//! ```rust,ignore
//! use docsync::clients::TransportError;
//!
//! match transport.send(HttpMethod::Get, &url, None, &token).await {
//!     Ok(envelope) => println!("Code {}", envelope.code),
//!     Err(TransportError::Network { url, source }) => {
//!         println!("Could not reach {url}: {source}");
//!     }
//!     Err(TransportError::Decode { status, .. }) => {
//!         println!("Server answered HTTP {status} with a non-envelope body");
//!     }
//!     Err(other) => println!("{other}"),
//! }
//! ```

use thiserror::Error;

/// Failure to complete a request/response exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP client could not be constructed.
    #[error("Transport error: failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request body could not be serialized to JSON.
    #[error("Transport error: failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request could not be sent or the response body could not be read.
    #[error("Transport error: request to {url} failed: {source}")]
    Network {
        /// The URL that was requested.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not a valid envelope.
    #[error("Transport error: undecodable response from {url} (HTTP {status}): {source}")]
    Decode {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code of the response.
        status: u16,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}
