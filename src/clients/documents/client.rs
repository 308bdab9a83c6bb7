//! Document client implementation.
//!
//! This module provides the [`DocumentClient`] type, which runs the four
//! document operations with bounded retry and transparent re-login.

use serde_json::Value;

use crate::auth::{AuthError, Session};
use crate::clients::documents::{
    document_path, Document, DocumentError, DocumentItem, DocumentOperation,
};
use crate::clients::{Envelope, HttpMethod, HttpTransport};
use crate::config::ClientConfig;
use crate::retry::{retry, RetryOutcome, RetryPolicy};

/// Client for single-document operations against the indexing service.
///
/// Each operation performs one exchange per attempt. When the reply carries
/// the authorization-expired code, the client logs in again and retries
/// with the new token, up to the configured attempt budget. Transport
/// failures and failed logins stop the operation at once. Any other reply
/// ends the retry loop, and a non-zero code is then returned as
/// [`DocumentError::Business`].
///
/// # Thread Safety
///
/// `DocumentClient` is `Send + Sync`; share it with `Arc` across tasks.
/// Concurrent operations that see the same expired token trigger a single
/// login.
///
/// # Example
///
/// ```rust,ignore
/// use docsync::{Address, ClientConfig, Document, DocumentClient, LoginPath, Password, Username};
///
/// let config = ClientConfig::builder()
///     .address(Address::new("search.internal:9200").unwrap())
///     .username(Username::new("river").unwrap())
///     .password(Password::new("secret").unwrap())
///     .login_path(LoginPath::new("api/login").unwrap())
///     .build()?;
///
/// let client = DocumentClient::connect(&config).await?;
///
/// let fields = serde_json::json!({"name": "widget"});
/// let document = Document::new("inventory", "item", "42", fields.as_object().unwrap().clone());
/// client.update(&document).await?;
/// client.delete("inventory", "item", "42").await?;
/// ```
#[derive(Debug)]
pub struct DocumentClient {
    transport: HttpTransport,
    session: Session,
    retry_policy: RetryPolicy,
}

// Verify DocumentClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DocumentClient>();
};

impl DocumentClient {
    /// Builds the transport and performs the initial login.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Transport`] if the HTTP client cannot be
    /// built, or [`DocumentError::Auth`] if the initial login fails.
    pub async fn connect(config: &ClientConfig) -> Result<Self, DocumentError> {
        let transport = HttpTransport::new(config)?;
        let session = Session::new(config, &transport);

        session.login(&transport).await?;

        tracing::info!(
            address = %config.address(),
            scheme = %transport.scheme(),
            "Connected to indexing service"
        );

        Ok(Self {
            transport,
            session,
            retry_policy: *config.retry_policy(),
        })
    }

    /// Returns the session holding the current token.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Returns the retry policy applied to every operation.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Logs in again and returns the login reply.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the login fails.
    pub async fn login(&self) -> Result<Envelope, AuthError> {
        self.session.login(&self.transport).await
    }

    /// Creates `document` under its index and type.
    ///
    /// The document id is not part of the request; the server assigns one.
    ///
    /// # Errors
    ///
    /// See [`DocumentError`].
    pub async fn create(&self, document: &Document) -> Result<(), DocumentError> {
        let body = Value::Object(document.fields.clone());
        self.execute(
            DocumentOperation::Create,
            &document.collection_path(),
            Some(&body),
        )
        .await
        .map(drop)
    }

    /// Reads a document, succeeding if the server answers with code 0.
    ///
    /// # Errors
    ///
    /// See [`DocumentError`].
    pub async fn get(&self, index: &str, doc_type: &str, id: &str) -> Result<(), DocumentError> {
        self.execute(
            DocumentOperation::Get,
            &document_path(index, doc_type, id),
            None,
        )
        .await
        .map(drop)
    }

    /// Reads a document and decodes its item payload.
    ///
    /// # Errors
    ///
    /// See [`DocumentError`]; [`DocumentError::Payload`] if the reply data is
    /// not an item object.
    pub async fn get_item(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
    ) -> Result<DocumentItem, DocumentError> {
        let envelope = self
            .execute(
                DocumentOperation::Get,
                &document_path(index, doc_type, id),
                None,
            )
            .await?;

        serde_json::from_value(envelope.data).map_err(|source| DocumentError::Payload { source })
    }

    /// Creates or replaces `document` at its id.
    ///
    /// # Errors
    ///
    /// See [`DocumentError`].
    pub async fn update(&self, document: &Document) -> Result<(), DocumentError> {
        let body = Value::Object(document.fields.clone());
        self.execute(DocumentOperation::Update, &document.path(), Some(&body))
            .await
            .map(drop)
    }

    /// Deletes a document.
    ///
    /// Deleting a missing id returns whatever business error the server
    /// defines for it.
    ///
    /// # Errors
    ///
    /// See [`DocumentError`].
    pub async fn delete(&self, index: &str, doc_type: &str, id: &str) -> Result<(), DocumentError> {
        self.execute(
            DocumentOperation::Delete,
            &document_path(index, doc_type, id),
            None,
        )
        .await
        .map(drop)
    }

    /// Runs one operation through the retry loop and checks the final code.
    async fn execute(
        &self,
        operation: DocumentOperation,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Envelope, DocumentError> {
        let url = self.transport.url(path);
        let url = url.as_str();
        let method = operation.method();

        let envelope = retry(&self.retry_policy, move || self.attempt(method, url, body)).await?;

        if envelope.is_success() {
            return Ok(envelope);
        }

        tracing::debug!(
            %operation,
            url,
            code = envelope.code,
            "Operation rejected by server: {}",
            envelope.message
        );

        Err(DocumentError::Business {
            operation,
            code: envelope.code,
            message: envelope.message,
        })
    }

    /// One exchange, classified for the retry loop.
    async fn attempt(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> RetryOutcome<Envelope, DocumentError> {
        let token = self.session.token();

        let envelope = match self.transport.send(method, url, body, &token).await {
            Ok(envelope) => envelope,
            Err(error) => return RetryOutcome::Fatal(error.into()),
        };

        if !envelope.is_auth_expired() {
            return RetryOutcome::Success(envelope);
        }

        tracing::warn!(%method, url, "Session token rejected, logging in again");

        match self.session.reauthenticate(&self.transport, &token).await {
            Ok(_) => RetryOutcome::Retryable(DocumentError::AuthExpired {
                message: envelope.message,
            }),
            Err(error) => RetryOutcome::Fatal(error.into()),
        }
    }
}
