//! Document data types and URL paths.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::HttpMethod;

/// One of the four single-document operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentOperation {
    /// `POST /{index}/{type}`
    Create,
    /// `GET /{index}/{type}/{id}`
    Get,
    /// `PUT /{index}/{type}/{id}`
    Update,
    /// `DELETE /{index}/{type}/{id}`
    Delete,
}

impl DocumentOperation {
    /// Returns the HTTP method used by this operation.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Create => HttpMethod::Post,
            Self::Get => HttpMethod::Get,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }
}

impl fmt::Display for DocumentOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "Create"),
            Self::Get => write!(f, "Get"),
            Self::Update => write!(f, "Update"),
            Self::Delete => write!(f, "Delete"),
        }
    }
}

/// An addressable document and its fields.
///
/// # Example
///
/// ```rust
/// use docsync::Document;
/// use serde_json::json;
///
/// let fields = json!({"name": "widget", "qty": 3});
/// let document = Document::new("inventory", "item", "42", fields.as_object().unwrap().clone());
///
/// assert_eq!(document.path(), "inventory/item/42");
/// assert_eq!(document.collection_path(), "inventory/item");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Index the document lives in.
    pub index: String,
    /// Type name within the index.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Document id. Ignored by create, where the server assigns the id.
    pub id: String,
    /// Document body.
    pub fields: Map<String, Value>,
}

impl Document {
    /// Creates a document.
    #[must_use]
    pub fn new(
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
        fields: Map<String, Value>,
    ) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
            id: id.into(),
            fields,
        }
    }

    /// Returns `{index}/{type}/{id}` with each segment percent-encoded.
    #[must_use]
    pub fn path(&self) -> String {
        document_path(&self.index, &self.doc_type, &self.id)
    }

    /// Returns `{index}/{type}` with each segment percent-encoded.
    #[must_use]
    pub fn collection_path(&self) -> String {
        collection_path(&self.index, &self.doc_type)
    }
}

/// Builds `{index}/{type}/{id}`.
#[must_use]
pub fn document_path(index: &str, doc_type: &str, id: &str) -> String {
    format!(
        "{}/{}",
        collection_path(index, doc_type),
        urlencoding::encode(id)
    )
}

/// Builds `{index}/{type}`.
#[must_use]
pub fn collection_path(index: &str, doc_type: &str) -> String {
    format!(
        "{}/{}",
        urlencoding::encode(index),
        urlencoding::encode(doc_type)
    )
}

/// Item payload returned by a successful get.
///
/// Every field is optional on the wire; missing ones take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    /// Document id.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Index the document lives in.
    #[serde(rename = "_index", default)]
    pub index: String,
    /// Type name within the index.
    #[serde(rename = "_type", default)]
    pub doc_type: String,
    /// Server-side version counter.
    #[serde(rename = "_version", default)]
    pub version: i64,
    /// Whether the document exists.
    #[serde(default)]
    pub found: bool,
    /// Stored document body, if returned.
    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,
}

/// Shape of one entry of a multi-document submission.
///
/// No operation of [`DocumentClient`](crate::DocumentClient) consumes this
/// type; it is kept so callers that already build batches keep compiling.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Action name, e.g. `index` or `delete`.
    pub action: String,
    /// Target index.
    pub index: String,
    /// Target type name.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Target document id.
    pub id: String,
    /// Parent document id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Ingest pipeline, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,
    /// Document body.
    #[serde(default)]
    pub fields: Map<String, Value>,
}
