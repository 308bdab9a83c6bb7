//! Single-document operations.
//!
//! This module provides a higher-level client built on top of
//! [`HttpTransport`](crate::clients::HttpTransport) and
//! [`Session`](crate::auth::Session) that runs create, get, update and
//! delete with bounded retry and transparent re-login.
//!
//! # Overview
//!
//! - [`DocumentClient`]: the client with `create()`, `get()`, `update()`, `delete()`
//! - [`DocumentError`]: error type for document operations
//! - [`Document`], [`DocumentItem`], [`BatchRequest`]: data types
//!
//! # Wire Paths
//!
//! | Operation | Method   | Path                      |
//! |-----------|----------|---------------------------|
//! | Create    | `POST`   | `/{index}/{type}`         |
//! | Get       | `GET`    | `/{index}/{type}/{id}`    |
//! | Update    | `PUT`    | `/{index}/{type}/{id}`    |
//! | Delete    | `DELETE` | `/{index}/{type}/{id}`    |
//!
//! Path segments are percent-encoded.

mod client;
mod errors;
mod types;

pub use client::DocumentClient;
pub use errors::DocumentError;
pub use types::{
    collection_path, document_path, BatchRequest, Document, DocumentItem, DocumentOperation,
};
