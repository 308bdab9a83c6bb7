//! HTTP transport for the indexing service.
//!
//! This module provides the [`HttpTransport`] type, which performs a single
//! request/response exchange and decodes the reply into an [`Envelope`].
//! It never retries on its own; retry and re-authentication are layered on
//! top by [`DocumentClient`](crate::clients::documents::DocumentClient).

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::clients::envelope::{encode_body, Envelope};
use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::config::{Address, ClientConfig};

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// URL scheme selected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Plain `http`.
    Plain,
    /// Encrypted `https`.
    Secure,
}

impl Scheme {
    /// Returns the scheme as it appears in a URL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "http",
            Self::Secure => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sends JSON requests and decodes envelope responses.
///
/// The transport is configured once: scheme, server address, certificate
/// policy and default headers are fixed for its lifetime. The session token
/// is passed per call so a refreshed token is used by the very next
/// exchange.
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpTransport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// `http` or `https`.
    scheme: Scheme,
    /// Server authority and optional base path.
    address: Address,
    /// Headers sent with every request, except `Authorization`.
    default_headers: HashMap<String, String>,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a transport from the client configuration.
    ///
    /// Certificate verification stays on for secure transport unless the
    /// configuration explicitly opts out with
    /// [`accept_invalid_certs`](crate::ClientConfigBuilder::accept_invalid_certs).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the underlying reqwest client
    /// cannot be created (e.g., TLS backend initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let scheme = config.scheme();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}docsync v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let accept_invalid_certs = scheme == Scheme::Secure && config.accept_invalid_certs();
        if accept_invalid_certs {
            tracing::warn!(
                "TLS certificate verification is disabled for {}; connections are open to interception",
                config.address()
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(TransportError::Build)?;

        Ok(Self {
            client,
            scheme,
            address: config.address().clone(),
            default_headers,
        })
    }

    /// Returns the URL scheme in use.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the server address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the headers attached to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds `{scheme}://{address}/{path}`.
    ///
    /// `path` is used verbatim; callers are responsible for escaping.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}://{}/{}", self.scheme, self.address, path)
    }

    /// Performs one exchange and decodes the reply.
    ///
    /// The body is sent as JSON (an empty body when `None`) with
    /// `Authorization: JWT <token>`. The envelope is returned whatever its
    /// status code and whatever the HTTP status of the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the body cannot be encoded, the server
    /// cannot be reached, or the reply is not an envelope.
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
        token: &str,
    ) -> Result<Envelope, TransportError> {
        let payload = encode_body(body).map_err(TransportError::Encode)?;

        let mut req_builder = self.client.request(method.as_reqwest(), url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder
            .header("Authorization", format!("JWT {token}"))
            .body(payload);

        tracing::debug!(%method, url, "Sending request");

        let res = req_builder
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = res.status().as_u16();
        let body = res.bytes().await.map_err(|source| TransportError::Network {
            url: url.to_string(),
            source,
        })?;

        let envelope = Envelope::decode(&body).map_err(|source| TransportError::Decode {
            url: url.to_string(),
            status,
            source,
        })?;

        tracing::debug!(%method, url, status, code = envelope.code, "Received envelope");

        Ok(envelope)
    }
}
