//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated server address.
///
/// The address is the authority of the indexing service (`host` or
/// `host:port`), optionally followed by a base path. It must not carry a
/// scheme; the scheme comes from the transport mode. Trailing slashes are
/// removed so URLs can be joined with a single `/`.
///
/// # Example
///
/// ```rust
/// use docsync::Address;
///
/// let address = Address::new("search.internal:9200/").unwrap();
/// assert_eq!(address.as_ref(), "search.internal:9200");
///
/// assert!(Address::new("https://search.internal").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Creates a new validated address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAddress`] if the address is empty, or
    /// [`ConfigError::InvalidAddress`] if it contains a scheme or whitespace.
    pub fn new(address: impl Into<String>) -> Result<Self, ConfigError> {
        let address = address.into();
        let trimmed = address.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(ConfigError::EmptyAddress);
        }

        if trimmed.contains("://")
            || trimmed.starts_with('/')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidAddress { address });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated login username.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated username.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty.
    pub fn new(username: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated login password.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`, so configurations can be logged safely.
///
/// # Example
///
/// ```rust
/// use docsync::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// A validated login endpoint path, relative to the server address.
///
/// Leading slashes are stripped: `/api/login` and `api/login` are equivalent.
///
/// # Example
///
/// ```rust
/// use docsync::LoginPath;
///
/// let path = LoginPath::new("/api/login").unwrap();
/// assert_eq!(path.as_ref(), "api/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginPath(String);

impl LoginPath {
    /// Creates a new validated login path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyLoginPath`] if nothing remains after
    /// trimming whitespace and leading slashes.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let path = path.into();
        let trimmed = path.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyLoginPath);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for LoginPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
