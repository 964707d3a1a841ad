//! HTTP contract tests for the Service Layer adapter, run against a local
//! mock server.

#![allow(clippy::unwrap_used)]

use b1link::{AdapterError, Method, ServiceLayerAdapter, ServiceLayerConfig, SessionState};
use httpmock::prelude::*;
use serde_json::json;

fn adapter_for(server: &MockServer) -> ServiceLayerAdapter {
    let config = ServiceLayerConfig::new(
        format!("http://{}", server.host()),
        server.port(),
        "v1",
        "SBODEMOUS",
    );
    ServiceLayerAdapter::new(config).unwrap()
}

#[tokio::test]
async fn login_stores_session_and_returns_full_payload() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST).path("/b1s/v1/Login").json_body(json!({
                "UserName": "manager",
                "Password": "secret",
                "CompanyDB": "SBODEMOUS",
            }));
            then.status(200).json_body(json!({
                "SessionId": "sess-123",
                "Version": "10.0",
                "SessionTimeout": 30,
            }));
        })
        .await;

    let mut adapter = adapter_for(&server);
    let response = adapter.authenticate("manager", "secret").await.unwrap();

    login.assert_async().await;
    assert_eq!(response.session_id, "sess-123");
    assert_eq!(response.version.as_deref(), Some("10.0"));
    assert_eq!(response.session_timeout, Some(30));
    assert_eq!(adapter.session_id(), Some("sess-123"));
}

#[tokio::test]
async fn request_after_login_carries_session_cookie_byte_for_byte() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/b1s/v1/Login");
            then.status(200).json_body(json!({ "SessionId": "sess-123" }));
        })
        .await;
    let orders = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/b1s/v1/Orders")
                .header("Cookie", "B1SESSION=sess-123;");
            then.status(200).json_body(json!({ "value": [{ "DocEntry": 1 }] }));
        })
        .await;

    let mut adapter = adapter_for(&server);
    adapter.authenticate("manager", "secret").await.unwrap();
    let payload = adapter.request(Method::GET, "Orders", None).await.unwrap();

    orders.assert_async().await;
    assert_eq!(payload, json!({ "value": [{ "DocEntry": 1 }] }));
}

#[tokio::test]
async fn request_before_login_sends_empty_cookie() {
    let server = MockServer::start_async().await;
    let anonymous = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/b1s/v1/Orders")
                .header("Cookie", "B1SESSION=;");
            then.status(401).json_body(json!({
                "error": { "code": 301, "message": { "value": "Invalid session." } }
            }));
        })
        .await;

    let adapter = adapter_for(&server);
    let result = adapter.request(Method::GET, "Orders", None).await;

    // The cookie must be sent exactly as `B1SESSION=;` and the server's
    // rejection must surface as a transport failure, not be masked locally.
    anonymous.assert_async().await;
    assert!(matches!(result, Err(AdapterError::Transport { .. })));
}

#[tokio::test]
async fn rejected_login_leaves_session_unchanged() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/b1s/v1/Login");
            then.status(401).json_body(json!({
                "error": { "code": 100, "message": { "value": "Invalid credentials." } }
            }));
        })
        .await;

    let mut adapter = adapter_for(&server);
    let result = adapter.authenticate("manager", "wrong").await;

    assert!(matches!(result, Err(AdapterError::Authentication { .. })));
    assert_eq!(adapter.session_state(), &SessionState::Unauthenticated);
    assert_eq!(adapter.session_id(), None);
}

#[tokio::test]
async fn reauthentication_overwrites_the_session_id() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(POST).path("/b1s/v1/Login");
            then.status(200).json_body(json!({ "SessionId": "sess-old" }));
        })
        .await;

    let mut adapter = adapter_for(&server);
    adapter.authenticate("manager", "secret").await.unwrap();
    assert_eq!(adapter.session_id(), Some("sess-old"));

    first.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/b1s/v1/Login");
            then.status(200).json_body(json!({ "SessionId": "sess-new" }));
        })
        .await;

    adapter.authenticate("manager", "secret").await.unwrap();
    assert_eq!(adapter.session_id(), Some("sess-new"));
}

#[tokio::test]
async fn request_body_is_forwarded_as_json() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/b1s/v1/Login");
            then.status(200).json_body(json!({ "SessionId": "sess-123" }));
        })
        .await;
    let create_order = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/b1s/v1/Orders")
                .header("Cookie", "B1SESSION=sess-123;")
                .json_body(json!({ "CardCode": "C20000", "DocDueDate": "2026-09-01" }));
            then.status(201).json_body(json!({ "DocEntry": 42 }));
        })
        .await;

    let mut adapter = adapter_for(&server);
    adapter.authenticate("manager", "secret").await.unwrap();
    let body = json!({ "CardCode": "C20000", "DocDueDate": "2026-09-01" });
    let payload = adapter
        .request(Method::POST, "Orders", Some(&body))
        .await
        .unwrap();

    create_order.assert_async().await;
    assert_eq!(payload, json!({ "DocEntry": 42 }));
}

#[tokio::test]
async fn empty_response_body_resolves_to_null() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/b1s/v1/Login");
            then.status(200).json_body(json!({ "SessionId": "sess-123" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/b1s/v1/Orders(42)");
            then.status(204);
        })
        .await;

    let mut adapter = adapter_for(&server);
    adapter.authenticate("manager", "secret").await.unwrap();
    let payload = adapter
        .request(Method::DELETE, "Orders(42)", None)
        .await
        .unwrap();

    assert_eq!(payload, serde_json::Value::Null);
}

#[tokio::test]
async fn logout_restores_the_empty_cookie() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/b1s/v1/Login");
            then.status(200).json_body(json!({ "SessionId": "sess-123" }));
        })
        .await;
    let anonymous = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/b1s/v1/Orders")
                .header("Cookie", "B1SESSION=;");
            then.status(401);
        })
        .await;

    let mut adapter = adapter_for(&server);
    adapter.authenticate("manager", "secret").await.unwrap();
    adapter.logout();

    let result = adapter.request(Method::GET, "Orders", None).await;
    anonymous.assert_async().await;
    assert!(result.is_err());
}
