//! Partner-scoped calls.

use serde_json::{Value, json};
use turbodocx::*;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{PARTNER_ID, PARTNER_KEY, partner};

#[tokio::test]
async fn test_partner_paths_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/partner/{PARTNER_ID}/organizations")))
        .and(header("authorization", format!("Bearer {PARTNER_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"results": [], "totalRecords": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orgs: Value = partner(&server).get("/organizations").await.unwrap();
    assert_eq!(orgs, json!({"results": [], "totalRecords": 0}));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-rapiddocx-org-id").is_none());
}

#[tokio::test]
async fn test_partner_audit_log_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/partner/{PARTNER_ID}/audit-logs")))
        .and(query_param("action", "org.create"))
        .and(query_param("resourceType", "organization"))
        .and(query_param("success", "true"))
        .and(query_param("startDate", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let logs: Vec<Value> = partner(&server)
        .get("/audit-logs")
        .query(
            AuditLogQuery::new()
                .action("org.create")
                .resource_type("organization")
                .success(true)
                .start_date("2024-01-01"),
        )
        .await
        .unwrap();
    assert!(logs.is_empty());

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default();
    assert!(!query.contains("limit"));
    assert!(!query.contains("endDate"));
}

#[tokio::test]
async fn test_partner_post_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/partner/{PARTNER_ID}/organizations")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": "org-9", "name": "Partner Org"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/partner/{PARTNER_ID}/organizations/org-9")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let partner = partner(&server);
    let created: Enveloped<Value> = partner
        .post("/organizations")
        .json(&json!({"name": "Partner Org"}))
        .await
        .unwrap();
    assert_eq!(created.data["id"], "org-9");

    let deleted: Value = partner.delete("/organizations/org-9").await.unwrap();
    assert_eq!(deleted, json!({"success": true}));
}

#[tokio::test]
async fn test_partner_errors_are_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/partner/{PARTNER_ID}/organizations/missing")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Organization not found",
            "code": "NOT_FOUND"
        })))
        .mount(&server)
        .await;

    let err = partner(&server)
        .get::<Value>("/organizations/missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.code(), Some("NOT_FOUND"));
}
