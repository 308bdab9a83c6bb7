//! # docsync
//!
//! A resilient client that pushes and retrieves documents against a remote
//! indexing service over HTTP, authorized by short-lived `JWT` session tokens.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - A JSON transport decoding every reply into a uniform [`Envelope`]
//! - Session login and transparent re-login when a token expires
//! - A generic bounded retry executor in [`retry`]
//! - Create, get, update and delete through [`DocumentClient`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docsync::{Address, ClientConfig, Document, DocumentClient, LoginPath, Password, Username};
//!
//! let config = ClientConfig::builder()
//!     .secure(true)
//!     .address(Address::new("search.internal:8443").unwrap())
//!     .username(Username::new("river").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .login_path(LoginPath::new("api/login").unwrap())
//!     .build()?;
//!
//! // Logs in once; fails if the credentials are rejected
//! let client = DocumentClient::connect(&config).await?;
//!
//! let fields = serde_json::json!({"name": "widget", "qty": 3});
//! let document = Document::new("inventory", "item", "42", fields.as_object().unwrap().clone());
//!
//! client.update(&document).await?;
//! let item = client.get_item("inventory", "item", "42").await?;
//! assert!(item.found);
//! ```
//!
//! ## Failure Recovery
//!
//! - Transport failures are returned at once and never retried.
//! - A reply with code 16 triggers a login and another attempt, up to
//!   [`RetryPolicy::max_attempts`] attempts spaced by [`RetryPolicy::delay`].
//! - Any other non-zero code is returned as [`DocumentError::Business`].
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: [`DocumentClient`] is `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod retry;

pub use auth::{AuthError, Session};
pub use config::{Address, ClientConfig, ClientConfigBuilder, LoginPath, Password, Username};
pub use error::ConfigError;
pub use retry::{RetryOutcome, RetryPolicy};

pub use clients::documents::{BatchRequest, Document, DocumentItem, DocumentOperation};
pub use clients::{
    DocumentClient, DocumentError, Envelope, HttpMethod, HttpTransport, Scheme, TransportError,
};
