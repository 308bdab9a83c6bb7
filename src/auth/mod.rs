//! Session authentication for the indexing service.
//!
//! # Overview
//!
//! - [`Session`]: credentials plus the current `JWT` session token
//! - [`AuthError`]: why a login did not produce a token
//!
//! # Login Protocol
//!
//! The client POSTs `{"username": ..., "password": ...}` to the configured
//! login path. A reply of `{"Code":0,"Data":"<token>"}` stores the token,
//! which is then sent as `Authorization: JWT <token>` on every request. When
//! a later reply carries the authorization-expired code the client logs in
//! again and retries the request.

mod errors;
pub mod session;

pub use errors::AuthError;
pub use session::Session;
