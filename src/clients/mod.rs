//! HTTP client types for the indexing service.
//!
//! This module provides the transport layer and the document client built
//! on top of it.
//!
//! # Overview
//!
//! - [`HttpTransport`]: one JSON exchange, decoded into an [`Envelope`]
//! - [`Envelope`]: the `{"Code","Message","Data"}` reply wrapper
//! - [`HttpMethod`]: methods used by the service
//! - [`TransportError`]: exchange failures, always fatal
//! - [`documents::DocumentClient`]: create/get/update/delete with retry and re-login
//!
//! # Retry Behavior
//!
//! The transport never retries. [`documents::DocumentClient`] retries only
//! when a reply carries [`AUTH_EXPIRED_CODE`], after logging in again:
//!
//! - **Code 16**: re-login, wait the configured delay, try again
//! - **Other codes**: stop; a non-zero code becomes a business error
//! - **Transport errors**: stop immediately

pub mod documents;
mod envelope;
mod errors;
mod http_request;
mod transport;

pub use envelope::{encode_body, Envelope, AUTH_EXPIRED_CODE, SUCCESS_CODE};
pub use errors::TransportError;
pub use http_request::HttpMethod;
pub use transport::{HttpTransport, Scheme, CLIENT_VERSION};

pub use documents::{DocumentClient, DocumentError};
