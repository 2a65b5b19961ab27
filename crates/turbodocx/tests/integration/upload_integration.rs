//! Multipart uploads as received by the backend.

use std::io::Write;

use serde_json::{Value, json};
use turbodocx::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{ORG_ID, client};

async fn mount_upload(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("x-rapiddocx-org-id", ORG_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "file-1"}})))
        .expect(1)
        .mount(server)
        .await;
}

/// The single request received, with its body lowercased for header checks.
async fn received(server: &MockServer) -> (String, String) {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body = String::from_utf8_lossy(&requests[0].body).to_lowercase();
    (content_type, body)
}

#[tokio::test]
async fn test_pdf_bytes_upload() {
    let server = MockServer::start().await;
    mount_upload(&server).await;

    let uploaded: Value = client(&server)
        .upload(
            "/upload",
            Upload::bytes(b"%PDF-1.4 test".to_vec())
                .file_name("contract.pdf")
                .field("name", "Contract")
                .field("isTemplate", false)
                .json_field("tags", &["legal", "q3"])
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(uploaded, json!({"id": "file-1"}));

    let (content_type, body) = received(&server).await;
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(body.contains("name=\"file\"; filename=\"contract.pdf\""));
    assert!(body.contains("content-type: application/pdf"));
    assert!(body.contains("%pdf-1.4 test"));
    assert!(body.contains("name=\"name\"\r\n\r\ncontract"));
    assert!(body.contains("name=\"istemplate\"\r\n\r\nfalse"));
    assert!(body.contains("name=\"tags\"\r\n\r\n[\"legal\",\"q3\"]"));
}

#[tokio::test]
async fn test_sniffed_name_for_unnamed_bytes() {
    let server = MockServer::start().await;
    mount_upload(&server).await;

    let _: Value = client(&server)
        .upload("/upload", Upload::bytes(b"PK\x03\x04ppt/slides/slide1.xml".to_vec()))
        .await
        .unwrap();

    let (_, body) = received(&server).await;
    assert!(body.contains("filename=\"document.pptx\""));
    assert!(body.contains(&format!("content-type: {PPTX_MIME}")));
}

#[tokio::test]
async fn test_path_upload_uses_file_name() {
    let server = MockServer::start().await;
    mount_upload(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("offer-letter.docx");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(b"PK\x03\x04word/document.xml").unwrap();
    drop(file);

    let _: Value = client(&server)
        .upload("/upload", Upload::path(&file_path))
        .await
        .unwrap();

    let (_, body) = received(&server).await;
    assert!(body.contains("filename=\"offer-letter.docx\""));
    assert!(body.contains(&format!("content-type: {DOCX_MIME}")));
}

#[tokio::test]
async fn test_missing_file_is_io_error_and_sends_nothing() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let err = client(&server)
        .upload::<Value>("/upload", Upload::path(dir.path().join("missing.pdf")))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)), "got: {:?}", err);
    assert!(server.received_requests().await.unwrap().is_empty());
}
