// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /upload` (spec §4.5.5): multipart upload that writes a PDF plus a
//! generated metadata document under the root, submits an OCR job, and
//! optionally a second redaction job sharing the same PDF.

use std::sync::atomic::{AtomicU64, Ordering};

use pdfq_core::JobId;
use pdfq_queue::Queue;
use serde_json::json;

use crate::context::{blocking, ServerContext};
use crate::error::{ServerError, ServerResult};
use crate::http::request::RawRequest;
use crate::http::response::Response;
use crate::multipart::{extract_boundary, field_file, field_text, parse_multipart};
use crate::path_safety::is_safe_relpath;

static UPLOAD_COUNTER: AtomicU64 = AtomicU64::new(0);

fn generate_uuid(label: &str) -> JobId {
    let label = if label.is_empty() { "upload" } else { label };
    let epoch = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    let pid = std::process::id();
    let counter = UPLOAD_COUNTER.fetch_add(1, Ordering::Relaxed);
    let sanitized_label: String = label.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_').collect();
    let sanitized_label = if sanitized_label.is_empty() { "upload".to_string() } else { sanitized_label };
    JobId::new(format!("{sanitized_label}-{epoch}-{pid}-{counter}"))
}

fn split_patterns(raw: &str) -> Vec<String> {
    raw.split(|c| c == ',' || c == '\n').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

pub async fn handle(req: &RawRequest, body: Vec<u8>, ctx: &ServerContext) -> ServerResult<Response> {
    let content_type = req.header("content-type").ok_or_else(|| ServerError::Parse("missing Content-Type".into()))?;
    let boundary = extract_boundary(content_type).ok_or_else(|| ServerError::Parse("missing multipart boundary".into()))?;
    let parts = parse_multipart(&body, &boundary)?;

    let pdf_part = field_file(&parts, "pdf").ok_or_else(|| ServerError::InvalidArgument("missing pdf part".into()))?;
    if pdf_part.body.is_empty() {
        return Err(ServerError::InvalidArgument("pdf part is empty".into()));
    }
    let pdf_bytes = pdf_part.body.clone();

    let output_dir = field_text(&parts, "output_dir").unwrap_or_default();
    if !is_safe_relpath(&output_dir) {
        return Err(ServerError::InvalidArgument(format!("unsafe output_dir: {output_dir}")));
    }
    let label = field_text(&parts, "label").unwrap_or_default();
    let priority = matches!(field_text(&parts, "priority").as_deref(), Some("1") | Some("true") | Some("yes"));
    let redact = matches!(field_text(&parts, "redact").as_deref(), Some("1") | Some("true") | Some("yes"));
    let redactions_raw = field_text(&parts, "redactions").unwrap_or_default();
    let redaction_patterns = split_patterns(&redactions_raw);

    let root = ctx.root.clone();
    let dest_dir = root.join(&output_dir);

    let ocr_uuid = generate_uuid(&label);
    let redact_uuid = if redact && !redaction_patterns.is_empty() { Some(generate_uuid(&label)) } else { None };

    let ocr_uuid_for_blocking = ocr_uuid.clone();
    let redact_uuid_for_blocking = redact_uuid.clone();
    let output_dir_for_blocking = output_dir.clone();

    blocking(move || {
        std::fs::create_dir_all(&dest_dir)?;

        let pdf_path = dest_dir.join(format!("{}.pdf", ocr_uuid_for_blocking.as_str()));
        std::fs::write(&pdf_path, &pdf_bytes)?;

        let ocr_meta_path = dest_dir.join(format!("{}.metadata.json", ocr_uuid_for_blocking.as_str()));
        let ocr_meta = json!({ "output_dir": output_dir_for_blocking }).to_string();
        std::fs::write(&ocr_meta_path, ocr_meta)?;

        let queue = Queue::new(&root);
        queue.submit(&ocr_uuid_for_blocking, &pdf_path, &ocr_meta_path, priority).map_err(ServerError::from)?;

        if let Some(redact_uuid) = &redact_uuid_for_blocking {
            let redact_meta_path = dest_dir.join(format!("{}.metadata.json", redact_uuid.as_str()));
            let redact_meta = json!({
                "output_dir": output_dir_for_blocking,
                "redactions": redaction_patterns,
            })
            .to_string();
            std::fs::write(&redact_meta_path, redact_meta)?;
            queue.submit(redact_uuid, &pdf_path, &redact_meta_path, priority).map_err(ServerError::from)?;
        }

        Ok::<(), ServerError>(())
    })
    .await?;

    let mut response = json!({ "ocr_uuid": ocr_uuid.as_str() });
    if let Some(redact_uuid) = redact_uuid {
        response["expected"] = json!({ "redact": { "uuid": redact_uuid.as_str() } });
    }

    Ok(Response::json(200, "OK", response.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_patterns_on_comma_and_newline() {
        let patterns = split_patterns("SSN, \nNAME\n , ADDR");
        assert_eq!(patterns, vec!["SSN".to_string(), "NAME".to_string(), "ADDR".to_string()]);
    }

    #[test]
    fn generated_uuid_fallback_label_is_upload() {
        let uuid = generate_uuid("");
        assert!(uuid.as_str().starts_with("upload-"));
    }

    #[test]
    fn generated_uuid_sanitizes_label() {
        let uuid = generate_uuid("a/b c");
        assert!(JobId::parse(uuid.as_str()).is_ok());
    }
}
