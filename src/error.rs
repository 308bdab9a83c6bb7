//! Configuration error types for the docsync client.
//!
//! This module contains the error type returned when building or validating
//! a [`ClientConfig`](crate::ClientConfig) and its newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation before any network traffic happens.
//!
//! # Example
//!
//! ```rust
//! use docsync::{Address, ConfigError};
//!
//! let result = Address::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAddress)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Server address cannot be empty.
    #[error("Server address cannot be empty. Please provide a host or host:port.")]
    EmptyAddress,

    /// Server address is malformed.
    #[error("Invalid server address '{address}'. Expected 'host' or 'host:port', optionally followed by a base path, without a scheme.")]
    InvalidAddress {
        /// The invalid address that was provided.
        address: String,
    },

    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide the login username.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the login password.")]
    EmptyPassword,

    /// Login path cannot be empty.
    #[error("Login path cannot be empty. Please provide the login endpoint path (e.g., 'api/login').")]
    EmptyLoginPath,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Retry policy is unusable.
    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy {
        /// The reason the policy was rejected.
        reason: String,
    },
}
