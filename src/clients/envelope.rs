//! Request body encoding and the response envelope.
//!
//! Every reply from the indexing service has the same shape:
//!
//! ```json
//! {"Code": 0, "Message": "", "Data": {"_id": "5", "found": true}}
//! ```
//!
//! `Code` 0 is success, [`AUTH_EXPIRED_CODE`] means the session token was
//! rejected, and any other value is a business-level failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status code reserved for an expired or invalid session token.
pub const AUTH_EXPIRED_CODE: i64 = 16;

/// Status code of a successful reply.
pub const SUCCESS_CODE: i64 = 0;

/// The uniform response wrapper returned by every endpoint.
///
/// Missing fields decode to their zero values, so `{"Code":16}` is a valid
/// envelope with an empty message and a `null` payload.
///
/// # Example
///
/// ```rust
/// use docsync::clients::Envelope;
///
/// let envelope = Envelope::decode(br#"{"Code":0,"Message":"","Data":"tok1"}"#).unwrap();
/// assert!(envelope.is_success());
/// assert_eq!(envelope.data.as_str(), Some("tok1"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Status code of the reply.
    #[serde(rename = "Code", default)]
    pub code: i64,
    /// Human-readable server message.
    #[serde(rename = "Message", default)]
    pub message: String,
    /// Operation-specific payload.
    #[serde(rename = "Data", default)]
    pub data: Value,
}

impl Envelope {
    /// Decodes an envelope from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the body is not an envelope-shaped object.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Returns `true` if the status code is [`SUCCESS_CODE`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Returns `true` if the server rejected the session token.
    #[must_use]
    pub const fn is_auth_expired(&self) -> bool {
        self.code == AUTH_EXPIRED_CODE
    }
}

/// Encodes an optional JSON body.
///
/// An absent body encodes to zero bytes rather than `null`.
///
/// # Errors
///
/// Returns the JSON error if the value cannot be serialized.
pub fn encode_body(body: Option<&Value>) -> Result<Vec<u8>, serde_json::Error> {
    body.map_or_else(|| Ok(Vec::new()), serde_json::to_vec)
}
