//! HTTP front end: upload submission and unauthenticated health checks.

use crate::prelude::{multipart_body, RunningServer};

#[tokio::test]
async fn health_returns_ok_even_with_a_token_configured() {
    let root = tempfile::tempdir().unwrap();
    let server = RunningServer::start(root.path(), Some("secret-token")).await;

    let (status, _headers, body) = server.request("GET", "/health", &[], &[]).await;

    assert_eq!(status, 200);
    assert_eq!(body, b"ok\n");
}

#[tokio::test]
async fn upload_with_redact_flag_queues_both_jobs_under_priority() {
    let root = tempfile::tempdir().unwrap();
    let server = RunningServer::start(root.path(), None).await;

    let boundary = "pdfqspecboundary";
    let body = multipart_body(
        boundary,
        &[("output_dir", "uploads/ui"), ("label", "upload"), ("priority", "1"), ("redact", "1"), ("redactions", "SECRET")],
        ("pdf", "a.pdf", b"%PDF-1.7\nSECRET DATA"),
    );

    let (status, headers, response_body) = server
        .request("POST", "/upload", &[("Content-Type", &format!("multipart/form-data; boundary={boundary}"))], &body)
        .await;

    assert_eq!(status, 200);
    assert!(headers.iter().any(|(k, v)| k.eq_ignore_ascii_case("content-type") && v.contains("json")));

    let response: serde_json::Value = serde_json::from_slice(&response_body).unwrap();
    let ocr_uuid = response["ocr_uuid"].as_str().expect("ocr_uuid present").to_string();
    let redact_uuid = response["expected"]["redact"]["uuid"].as_str().expect("expected.redact.uuid present").to_string();

    let priority_dir = root.path().join("priority_jobs");
    assert!(priority_dir.join(format!("{ocr_uuid}.pdf.job")).exists());
    assert!(priority_dir.join(format!("{ocr_uuid}.metadata.job")).exists());
    assert!(priority_dir.join(format!("{redact_uuid}.pdf.job")).exists());
    assert!(priority_dir.join(format!("{redact_uuid}.metadata.job")).exists());
}

#[tokio::test]
async fn upload_without_a_bearer_token_is_rejected_when_one_is_configured() {
    let root = tempfile::tempdir().unwrap();
    let server = RunningServer::start(root.path(), Some("secret-token")).await;

    let boundary = "pdfqspecboundary";
    let body = multipart_body(boundary, &[("output_dir", "uploads/ui")], ("pdf", "a.pdf", b"%PDF-1.7\nhello"));

    let (status, _headers, _body) = server
        .request("POST", "/upload", &[("Content-Type", &format!("multipart/form-data; boundary={boundary}"))], &body)
        .await;

    assert_eq!(status, 401);
}
