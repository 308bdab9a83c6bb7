//! Document operation error types.
//!
//! # Error Handling
//!
//! - [`DocumentError::Transport`]: the exchange failed; never retried
//! - [`DocumentError::Auth`]: re-login failed; aborts the operation
//! - [`DocumentError::AuthExpired`]: every attempt was rejected for an expired token
//! - [`DocumentError::Business`]: the server answered with a non-zero code
//! - [`DocumentError::Payload`]: a successful reply carried an unexpected payload
//!
//! # Example
//!
//! ```rust,ignore
//! use docsync::DocumentError;
//!
//! match client.delete("inventory", "item", "42").await {
//!     Ok(()) => println!("deleted"),
//!     Err(DocumentError::Business { code, message, .. }) => {
//!         println!("server refused ({code}): {message}");
//!     }
//!     Err(other) => println!("{other}"),
//! }
//! ```

use crate::auth::AuthError;
use crate::clients::documents::DocumentOperation;
use crate::clients::TransportError;
use thiserror::Error;

/// Error type for document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A transport-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Logging in (initially or after expiry) failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The token was still rejected when the attempt budget ran out.
    #[error("Authorization expired (code 16): {message}")]
    AuthExpired {
        /// Server message of the last rejected attempt.
        message: String,
    },

    /// The server rejected the operation.
    #[error("{operation} failed, code: {code}, message: {message}")]
    Business {
        /// The operation that failed.
        operation: DocumentOperation,
        /// Status code of the reply.
        code: i64,
        /// Server message of the reply.
        message: String,
    },

    /// The reply payload does not match the expected shape.
    #[error("Invalid document payload: {source}")]
    Payload {
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    /// Returns the server status code for business failures.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Business { code, .. } => Some(*code),
            Self::AuthExpired { .. } => Some(crate::clients::AUTH_EXPIRED_CODE),
            _ => None,
        }
    }
}
