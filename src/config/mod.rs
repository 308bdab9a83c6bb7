//! Configuration types for the docsync client.
//!
//! This module provides the construction-time configuration of a
//! [`DocumentClient`](crate::DocumentClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: transport mode, server address, credentials and retry policy
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`Address`], [`Username`], [`Password`], [`LoginPath`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use docsync::{Address, ClientConfig, LoginPath, Password, Username};
//!
//! let config = ClientConfig::builder()
//!     .secure(true)
//!     .address(Address::new("search.internal:8443").unwrap())
//!     .username(Username::new("river").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .login_path(LoginPath::new("api/login").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.is_secure());
//! assert!(!config.accept_invalid_certs());
//! ```

mod newtypes;

pub use newtypes::{Address, LoginPath, Password, Username};

use crate::clients::Scheme;
use crate::error::ConfigError;
use crate::retry::RetryPolicy;

/// Configuration for a [`DocumentClient`](crate::DocumentClient).
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Certificate Verification
///
/// Secure transport verifies server certificates unless
/// [`ClientConfigBuilder::accept_invalid_certs`] is set. Turning verification
/// off is logged as a warning every time a client is built.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    secure: bool,
    address: Address,
    username: Username,
    password: Password,
    login_path: LoginPath,
    accept_invalid_certs: bool,
    retry_policy: RetryPolicy,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns whether `https` is used.
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        self.secure
    }

    /// Returns the URL scheme matching [`is_secure`](Self::is_secure).
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        if self.secure {
            Scheme::Secure
        } else {
            Scheme::Plain
        }
    }

    /// Returns the server address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the login username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the login password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the login endpoint path.
    #[must_use]
    pub const fn login_path(&self) -> &LoginPath {
        &self.login_path
    }

    /// Returns whether invalid TLS certificates are accepted.
    #[must_use]
    pub const fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Returns the retry policy applied to every document operation.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Required fields are `address`, `username`, `password` and `login_path`.
///
/// # Defaults
///
/// - `secure`: `false`
/// - `accept_invalid_certs`: `false`
/// - `retry_policy`: [`RetryPolicy::default`] (3 attempts, 1 second apart)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    secure: Option<bool>,
    address: Option<Address>,
    username: Option<Username>,
    password: Option<Password>,
    login_path: Option<LoginPath>,
    accept_invalid_certs: Option<bool>,
    retry_policy: Option<RetryPolicy>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `https` (`true`) or `http` (`false`).
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Sets the server address (required).
    #[must_use]
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the login username (required).
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the login password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the login endpoint path (required).
    #[must_use]
    pub fn login_path(mut self, path: LoginPath) -> Self {
        self.login_path = Some(path);
        self
    }

    /// Disables TLS certificate verification for secure transport.
    ///
    /// Only for servers with self-signed certificates on trusted networks.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    /// Sets the retry policy for document operations.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `address`, `username`,
    /// `password` or `login_path` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let address = self
            .address
            .ok_or(ConfigError::MissingRequiredField { field: "address" })?;
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;
        let login_path = self.login_path.ok_or(ConfigError::MissingRequiredField {
            field: "login_path",
        })?;

        Ok(ClientConfig {
            secure: self.secure.unwrap_or(false),
            address,
            username,
            password,
            login_path,
            accept_invalid_certs: self.accept_invalid_certs.unwrap_or(false),
            retry_policy: self.retry_policy.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
