//! Request/response round trips: envelopes, queries, bodies and downloads.

use std::future::IntoFuture;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use turbodocx::*;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::client;

#[derive(Debug, Deserialize, PartialEq)]
struct Organization {
    id: String,
    name: String,
}

// =============================================================================
// Envelopes
// =============================================================================

#[tokio::test]
async fn test_create_organization_success_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Acme"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": "org-1", "name": "Acme"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created: Enveloped<Organization> = client(&server)
        .post("/organizations")
        .json(&json!({"name": "Acme"}))
        .await
        .unwrap();

    assert_eq!(created.success, Some(true));
    let org = created.into_data();
    assert_eq!(org.id, "org-1");
    assert_eq!(org.name, "Acme");
}

#[tokio::test]
async fn test_sole_data_wrapper_is_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/org-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "org-1", "name": "Acme"}})),
        )
        .mount(&server)
        .await;

    let org: Organization = client(&server).get("/organizations/org-1").await.unwrap();
    assert_eq!(
        org,
        Organization {
            id: "org-1".to_string(),
            name: "Acme".to_string()
        }
    );
}

#[tokio::test]
async fn test_bare_body_is_decoded_whole() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/org-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "org-1", "name": "Acme"})),
        )
        .mount(&server)
        .await;

    let org: Organization = client(&server).get("/organizations/org-1").await.unwrap();
    assert_eq!(org.id, "org-1");
}

#[tokio::test]
async fn test_raw_envelope_keeps_data_wrapper() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "payload"})))
        .mount(&server)
        .await;

    let value: Value = client(&server).get("/settings").raw_envelope().await.unwrap();
    assert_eq!(value, json!({"data": "payload"}));
}

#[tokio::test]
async fn test_empty_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/organizations/org-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client(&server)
        .delete::<()>("/organizations/org-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_undecodable_success_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get::<Value>("/organizations")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got: {:?}", err);
}

// =============================================================================
// Verbs, queries and downloads
// =============================================================================

#[tokio::test]
async fn test_put_and_patch_send_json() {
    let server = MockServer::start().await;

    for verb in ["PUT", "PATCH"] {
        Mock::given(method(verb))
            .and(path("/organizations/org-1"))
            .and(body_json(json!({"name": "Renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": verb})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client(&server);
    let put: Value = client
        .put("/organizations/org-1")
        .json(&json!({"name": "Renamed"}))
        .await
        .unwrap();
    let patch: Value = client
        .patch("/organizations/org-1")
        .json(&json!({"name": "Renamed"}))
        .await
        .unwrap();

    assert_eq!(put, json!({"ok": "PUT"}));
    assert_eq!(patch, json!({"ok": "PATCH"}));
}

#[tokio::test]
async fn test_list_query_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .and(query_param("search", "acme corp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let orgs: Vec<Organization> = client(&server)
        .get("/organizations")
        .query(ListQuery::new().limit(10).offset(0).search("acme corp"))
        .await
        .unwrap();
    assert!(orgs.is_empty());
}

#[tokio::test]
async fn test_empty_query_adds_no_question_mark() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let _: Value = client(&server)
        .get("/organizations")
        .query(ListQuery::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let server = MockServer::start().await;
    let pdf = b"%PDF-1.7 signed document".to_vec();

    Mock::given(method("GET"))
        .and(path("/deliverable/file/doc-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(pdf.clone())
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;

    let bytes = client(&server)
        .get_raw("/deliverable/file/doc-1")
        .await
        .unwrap();
    assert_eq!(bytes, pdf);
    assert_eq!(detect_file_type(&bytes), FileTypeInfo::PDF);
}

// =============================================================================
// Timeouts and transport faults
// =============================================================================

#[tokio::test]
async fn test_per_call_timeout_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .get::<Value>("/slow")
        .timeout(Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(err.is_network(), "got: {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_client_default_timeout_applies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = TurboDocx::builder()
        .api_key("k")
        .org_id("o")
        .base_url(server.uri())
        .timeout(Duration::from_millis(100))
        .resolve_with(|_| None)
        .and_then(TurboDocx::new)
        .unwrap();

    let err = client.get::<Value>("/slow").await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = TurboDocx::builder()
        .api_key("k")
        .org_id("o")
        .base_url("http://127.0.0.1:1")
        .resolve_with(|_| None)
        .and_then(TurboDocx::new)
        .unwrap();

    let err = client.get::<Value>("/organizations").await.unwrap_err();
    assert!(err.is_network(), "got: {:?}", err);
    assert_eq!(err.status(), None);
    assert_eq!(err.code(), None);
}

#[tokio::test]
async fn test_dropped_call_sends_nothing_further() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let call = client(&server).get::<Value>("/slow").into_future();
    let outcome = tokio::time::timeout(Duration::from_millis(100), call).await;
    assert!(outcome.is_err(), "call should still be pending when dropped");

    let requests = server.received_requests().await.unwrap();
    assert!(requests.len() <= 1);
}
