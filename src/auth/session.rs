//! Session token management.
//!
//! This module provides the [`Session`] type, which holds the login
//! credentials and the current authorization token shared by every document
//! operation of a client.
//!
//! # Concurrency
//!
//! The token is stored as an immutable `Arc<str>` snapshot behind a
//! read/write lock; readers clone the snapshot and never observe a partial
//! write. Logins are serialized by an async mutex, and the new token is
//! published before that mutex is released, so every exchange started after
//! a login returns sends the new token.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::auth::errors::AuthError;
use crate::clients::{Envelope, HttpMethod, HttpTransport};
use crate::config::{ClientConfig, Password, Username};

/// The token currently in use and when it was obtained.
struct TokenState {
    token: Arc<str>,
    obtained_at: Option<DateTime<Utc>>,
    logins: u64,
}

/// Credentials plus the current session token.
///
/// A session starts without a token; [`login`](Self::login) obtains one.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`, making it safe to share across async tasks.
pub struct Session {
    username: Username,
    password: Password,
    login_url: String,
    state: RwLock<TokenState>,
    login_lock: Mutex<()>,
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

impl Session {
    /// Creates a session without a token for the configured login endpoint.
    #[must_use]
    pub fn new(config: &ClientConfig, transport: &HttpTransport) -> Self {
        Self {
            username: config.username().clone(),
            password: config.password().clone(),
            login_url: transport.url(config.login_path().as_ref()),
            state: RwLock::new(TokenState {
                token: Arc::from(""),
                obtained_at: None,
                logins: 0,
            }),
            login_lock: Mutex::new(()),
        }
    }

    /// Returns the full login URL.
    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Returns a snapshot of the current token (empty before the first login).
    #[must_use]
    pub fn token(&self) -> Arc<str> {
        Arc::clone(&self.state.read().token)
    }

    /// Returns when the current token was obtained.
    #[must_use]
    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.state.read().obtained_at
    }

    /// Returns the number of successful logins performed by this session.
    #[must_use]
    pub fn login_count(&self) -> u64 {
        self.state.read().logins
    }

    /// Logs in and replaces the current token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Transport`] if the exchange fails,
    /// [`AuthError::Rejected`] if the reply code is non-zero, or
    /// [`AuthError::MalformedToken`] if the payload is not a string.
    pub async fn login(&self, transport: &HttpTransport) -> Result<Envelope, AuthError> {
        let _guard = self.login_lock.lock().await;
        self.login_locked(transport).await
    }

    /// Logs in again after `stale_token` was rejected by the server.
    ///
    /// If another task already replaced `stale_token` while this one waited
    /// for the login lock, no login is performed and `Ok(false)` is
    /// returned. Returns `Ok(true)` after a fresh login.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    pub async fn reauthenticate(
        &self,
        transport: &HttpTransport,
        stale_token: &str,
    ) -> Result<bool, AuthError> {
        let _guard = self.login_lock.lock().await;

        if self.token().as_ref() != stale_token {
            tracing::debug!("Session token already refreshed by a concurrent operation");
            return Ok(false);
        }

        self.login_locked(transport).await.map(|_| true)
    }

    async fn login_locked(&self, transport: &HttpTransport) -> Result<Envelope, AuthError> {
        let body = json!({
            "username": self.username.as_ref(),
            "password": self.password.as_ref(),
        });
        let current = self.token();

        let envelope = transport
            .send(HttpMethod::Post, &self.login_url, Some(&body), &current)
            .await?;

        if !envelope.is_success() {
            return Err(AuthError::Rejected {
                code: envelope.code,
                message: envelope.message,
            });
        }

        let Some(token) = envelope.data.as_str() else {
            return Err(AuthError::MalformedToken {
                payload: json_kind(&envelope.data),
            });
        };

        {
            let mut state = self.state.write();
            state.token = Arc::from(token);
            state.obtained_at = Some(Utc::now());
            state.logins += 1;
        }

        tracing::info!(
            login_url = %self.login_url,
            user = self.username.as_ref(),
            "Obtained session token"
        );

        Ok(envelope)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("password", &self.password)
            .field("login_url", &self.login_url)
            .field("has_token", &!state.token.is_empty())
            .field("last_login", &state.obtained_at)
            .finish_non_exhaustive()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
