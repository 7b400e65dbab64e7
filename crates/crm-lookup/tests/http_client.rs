//! HTTP client tests against a mock lookup service.

use std::time::Duration;

use crm_lookup::{Candidate, CandidateId, HttpLookupClient, LookupError, LookupSettings, LookupSource};
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> HttpLookupClient {
    let settings = LookupSettings::new(server.url("/api"), "customers");
    HttpLookupClient::new(&settings).expect("client builds")
}

#[tokio::test]
async fn search_sends_query_and_parses_candidates() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/customers/")
                .query_param("search", "acme")
                .header("accept", "application/json");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "data": [
                    { "id": 42, "name": "Acme Inc", "email": "ops@acme.test" },
                    { "id": 43, "name": "Acme Logistics" }
                ]}
            }));
        })
        .await;

    let candidates = client_for(&server).search("acme").await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        candidates,
        vec![
            Candidate::new(42, "Acme Inc").with_detail("ops@acme.test"),
            Candidate::new(43, "Acme Logistics"),
        ]
    );
}

#[tokio::test]
async fn fetch_by_id_uses_record_path() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/customers/7");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "data": { "id": 7, "name": "Beta Co" } }
            }));
        })
        .await;

    let record = client_for(&server)
        .fetch_by_id(&CandidateId::Number(7))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(record, Candidate::new(7, "Beta Co"));
}

#[tokio::test]
async fn bearer_token_is_forwarded() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/customers/")
                .header("authorization", "Bearer s3cret");
            then.status(200)
                .json_body(json!({ "success": true, "data": { "data": [] } }));
        })
        .await;

    let settings = LookupSettings::new(server.url("/api"), "customers").with_auth_token("s3cret");
    let client = HttpLookupClient::new(&settings).unwrap();

    assert!(client.search("x").await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/customers/99");
            then.status(404).body("not found");
        })
        .await;

    let err = client_for(&server)
        .fetch_by_id(&CandidateId::Number(99))
        .await
        .unwrap_err();

    assert_eq!(err, LookupError::NotFound("99".to_string()));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/customers/");
            then.status(502).body("bad gateway");
        })
        .await;

    let err = client_for(&server).search("acme").await.unwrap_err();

    assert_eq!(
        err,
        LookupError::Status {
            status: 502,
            body: "bad gateway".to_string()
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unsuccessful_envelope_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/customers/");
            then.status(200)
                .json_body(json!({ "success": false, "message": "session expired" }));
        })
        .await;

    let err = client_for(&server).search("acme").await.unwrap_err();

    assert_eq!(err, LookupError::Rejected("session expired".to_string()));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/customers/");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({ "success": true, "data": { "data": [] } }));
        })
        .await;

    let mut settings = LookupSettings::new(server.url("/api"), "customers");
    settings.timeout_ms = 50;
    let client = HttpLookupClient::new(&settings).unwrap();

    let err = client.search("acme").await.unwrap_err();
    assert!(matches!(err, LookupError::Network(_)));
}
