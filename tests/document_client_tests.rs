//! Integration tests for the document client.
//!
//! These tests run the client against a mock indexing service and verify
//! the retry, re-login and error classification behavior end to end.

use std::sync::Arc;
use std::time::{Duration, Instant};

use docsync::{
    Address, AuthError, ClientConfig, Document, DocumentClient, DocumentError, DocumentOperation,
    LoginPath, Password, RetryPolicy, TransportError, Username,
};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PATH: &str = "/api/login";

/// Creates a configuration pointing at the mock server.
fn create_config(server: &MockServer, policy: RetryPolicy) -> ClientConfig {
    ClientConfig::builder()
        .address(Address::new(server.address().to_string()).unwrap())
        .username(Username::new("river").unwrap())
        .password(Password::new("secret").unwrap())
        .login_path(LoginPath::new(LOGIN_PATH).unwrap())
        .retry_policy(policy)
        .build()
        .unwrap()
}

fn quick_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10)).unwrap()
}

/// Builds an envelope reply.
fn reply(code: i64, message: &str, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "Code": code,
        "Message": message,
        "Data": data,
    }))
}

/// Mounts a login endpoint that always hands out `token`.
async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(0, "", json!(token)))
        .mount(server)
        .await;
}

fn widget(id: &str) -> Document {
    let fields = json!({"name": "widget", "qty": 3});
    Document::new("idx", "type", id, fields.as_object().unwrap().clone())
}

// ============================================================================
// Construction
// ============================================================================

#[tokio::test]
async fn test_connect_logs_in_and_stores_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({"username": "river", "password": "secret"})))
        .and(header("Content-Type", "application/json"))
        .respond_with(reply(0, "", json!("tok1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(DocumentClient::connect(&create_config(&server, quick_policy())).await);

    assert_eq!(client.session().token().as_ref(), "tok1");
    assert_eq!(client.session().login_count(), 1);
}

#[tokio::test]
async fn test_connect_fails_when_login_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(401, "invalid credentials", Value::Null))
        .mount(&server)
        .await;

    let result = DocumentClient::connect(&create_config(&server, quick_policy())).await;

    assert!(matches!(
        result,
        Err(DocumentError::Auth(AuthError::Rejected { code: 401, .. }))
    ));
}

#[tokio::test]
async fn test_connect_fails_on_malformed_login_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(0, "", json!(12345)))
        .mount(&server)
        .await;

    let result = DocumentClient::connect(&create_config(&server, quick_policy())).await;

    match result {
        Err(error @ DocumentError::Auth(AuthError::MalformedToken { .. })) => {
            assert!(error.to_string().contains("malformed login response"));
        }
        other => panic!("Expected MalformedToken, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connect_fails_when_server_is_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);

    let config = ClientConfig::builder()
        .address(Address::new(address).unwrap())
        .username(Username::new("river").unwrap())
        .password(Password::new("secret").unwrap())
        .login_path(LoginPath::new(LOGIN_PATH).unwrap())
        .build()
        .unwrap();

    let result = DocumentClient::connect(&config).await;

    match result {
        Err(error @ DocumentError::Auth(AuthError::Transport(TransportError::Network { .. }))) => {
            let message = error.to_string();
            assert!(message.contains("Authorization failed"));
            assert!(message.contains("Transport error"));
        }
        other => panic!("Expected a network error during login, got: {other:?}"),
    }
}

// ============================================================================
// Successful operations
// ============================================================================

#[tokio::test]
async fn test_get_with_found_document_succeeds() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("GET"))
        .and(path("/idx/type/5"))
        .and(header("Authorization", "JWT tok1"))
        .and(header("Content-Type", "application/json"))
        .respond_with(reply(0, "", json!({"_id": "5", "found": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();

    assert_eq!(client.session().token().as_ref(), "tok1");
    assert_ok!(client.get("idx", "type", "5").await);
}

#[tokio::test]
async fn test_get_item_decodes_payload() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("GET"))
        .and(path("/idx/type/5"))
        .respond_with(reply(
            0,
            "",
            json!({
                "_id": "5",
                "_index": "idx",
                "_type": "type",
                "_version": 2,
                "found": true,
                "_source": {"name": "widget"}
            }),
        ))
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();
    let item = client.get_item("idx", "type", "5").await.unwrap();

    assert_eq!(item.id, "5");
    assert_eq!(item.version, 2);
    assert!(item.found);
    assert_eq!(item.source.unwrap()["name"], "widget");
}

#[tokio::test]
async fn test_get_item_rejects_unexpected_payload() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("GET"))
        .and(path("/idx/type/5"))
        .respond_with(reply(0, "", json!("not an item")))
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();
    let result = client.get_item("idx", "type", "5").await;

    assert!(matches!(result, Err(DocumentError::Payload { .. })));
}

#[tokio::test]
async fn test_create_posts_fields_to_collection_path() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("POST"))
        .and(path("/idx/type"))
        .and(header("Authorization", "JWT tok1"))
        .and(body_json(json!({"name": "widget", "qty": 3})))
        .respond_with(reply(0, "", json!({"_id": "generated"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();

    assert_ok!(client.create(&widget("ignored")).await);
}

#[tokio::test]
async fn test_update_puts_fields_to_document_path() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("PUT"))
        .and(path("/idx/type/5"))
        .and(body_json(json!({"name": "widget", "qty": 3})))
        .respond_with(reply(0, "", Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();

    assert_ok!(client.update(&widget("5")).await);
}

#[tokio::test]
async fn test_delete_sends_no_body() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("DELETE"))
        .and(path("/idx/type/5"))
        .respond_with(reply(0, "", Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();

    assert_ok!(client.delete("idx", "type", "5").await);

    let requests = server.received_requests().await.unwrap();
    let delete = requests
        .iter()
        .find(|request| request.method.to_string() == "DELETE")
        .unwrap();
    assert!(delete.body.is_empty());
}

// ============================================================================
// Re-login and retry
// ============================================================================

#[tokio::test]
async fn test_expired_token_triggers_single_relogin_and_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(0, "", json!("tok1")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(0, "", json!("tok2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/idx/type/5"))
        .and(header("Authorization", "JWT tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Code": 16})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/idx/type/5"))
        .and(header("Authorization", "JWT tok2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Code": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();

    assert_ok!(client.update(&widget("5")).await);
    assert_eq!(client.session().token().as_ref(), "tok2");
    assert_eq!(client.session().login_count(), 2);
}

#[tokio::test]
async fn test_expired_token_on_every_attempt_exhausts_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(0, "", json!("tok1")))
        // initial login plus one re-login per rejected attempt
        .expect(4)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/idx/type/5"))
        .respond_with(reply(16, "token expired", Value::Null))
        .expect(3)
        .mount(&server)
        .await;

    let policy = RetryPolicy::new(3, Duration::from_millis(50)).unwrap();
    let client = DocumentClient::connect(&create_config(&server, policy))
        .await
        .unwrap();

    let started = Instant::now();
    let result = client.get("idx", "type", "5").await;
    let elapsed = started.elapsed();

    match assert_err!(result) {
        DocumentError::AuthExpired { message } => assert_eq!(message, "token expired"),
        other => panic!("Expected AuthExpired, got: {other:?}"),
    }
    assert!(elapsed >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_failed_relogin_aborts_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(0, "", json!("tok1")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(7, "account locked", Value::Null))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/idx/type/5"))
        .respond_with(reply(16, "", Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();
    let result = client.update(&widget("5")).await;

    match result {
        Err(DocumentError::Auth(AuthError::Rejected { code, message })) => {
            assert_eq!(code, 7);
            assert_eq!(message, "account locked");
        }
        other => panic!("Expected re-login rejection, got: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_expiry_triggers_one_relogin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(0, "", json!("tok1")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(reply(0, "", json!("tok2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("Authorization", "JWT tok1"))
        .respond_with(reply(16, "", Value::Null))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("Authorization", "JWT tok2"))
        .respond_with(reply(0, "", json!({"found": true})))
        .mount(&server)
        .await;

    let client = Arc::new(
        DocumentClient::connect(&create_config(&server, quick_policy()))
            .await
            .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get("idx", "type", &i.to_string()).await })
        })
        .collect();

    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }
    assert_eq!(client.session().token().as_ref(), "tok2");
    assert_eq!(client.session().login_count(), 2);
}

// ============================================================================
// Non-retried failures
// ============================================================================

#[tokio::test]
async fn test_business_error_is_not_retried() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("POST"))
        .and(path("/idx/type"))
        .respond_with(reply(500, "disk full", Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();
    let error = client.create(&widget("5")).await.unwrap_err();

    let message = error.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("disk full"));
    assert!(matches!(
        error,
        DocumentError::Business {
            operation: DocumentOperation::Create,
            code: 500,
            ..
        }
    ));
    assert_eq!(client.session().login_count(), 1);
}

#[tokio::test]
async fn test_undecodable_response_is_fatal_after_one_attempt() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("GET"))
        .and(path("/idx/type/5"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let policy = RetryPolicy::new(3, Duration::from_secs(5)).unwrap();
    let client = DocumentClient::connect(&create_config(&server, policy))
        .await
        .unwrap();

    let started = Instant::now();
    let result = client.get("idx", "type", "5").await;

    assert!(matches!(
        result,
        Err(DocumentError::Transport(TransportError::Decode { status: 502, .. }))
    ));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_delete_missing_document_returns_business_error() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("DELETE"))
        .and(path("/idx/type/missing"))
        .respond_with(reply(404, "document not found", json!({"found": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();
    let result = client.delete("idx", "type", "missing").await;

    match result {
        Err(DocumentError::Business {
            operation,
            code,
            message,
        }) => {
            assert_eq!(operation, DocumentOperation::Delete);
            assert_eq!(code, 404);
            assert_eq!(message, "document not found");
        }
        other => panic!("Expected business error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_zero_http_status_with_envelope_is_decoded() {
    let server = MockServer::start().await;
    mount_login(&server, "tok1").await;
    Mock::given(method("GET"))
        .and(path("/idx/type/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "Code": 404,
            "Message": "not found",
            "Data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocumentClient::connect(&create_config(&server, quick_policy()))
        .await
        .unwrap();
    let error = client.get("idx", "type", "5").await.unwrap_err();

    assert_eq!(error.code(), Some(404));
}
