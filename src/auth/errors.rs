//! Login error types.
//!
//! An [`AuthError`] means a login attempt did not produce a token. It is
//! fatal to any document operation that triggered the login.

use crate::clients::TransportError;
use thiserror::Error;

/// Errors that can occur while obtaining a session token.
///
/// # Example
///
/// ```rust
/// use docsync::auth::AuthError;
///
/// let error = AuthError::Rejected {
///     code: 401,
///     message: "bad credentials".to_string(),
/// };
/// assert!(error.to_string().starts_with("Authorization failed"));
/// assert!(error.to_string().contains("bad credentials"));
/// ```
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login exchange itself failed.
    #[error("Authorization failed: {0}")]
    Transport(#[from] TransportError),

    /// The server answered the login with a non-zero status code.
    #[error("Authorization failed: login rejected with code {code}: {message}")]
    Rejected {
        /// Status code of the login reply.
        code: i64,
        /// Server message of the login reply.
        message: String,
    },

    /// The login succeeded but its payload is not a string token.
    #[error("Authorization failed: malformed login response, expected a string token but got {payload}")]
    MalformedToken {
        /// JSON kind of the payload that was received.
        payload: &'static str,
    },
}
