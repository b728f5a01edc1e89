//! Literal-pattern redaction against a small PDF body.

use crate::prelude::write_file;
use pdfq_redact::{parse_plan, redact_file};

#[test]
fn redacts_a_literal_pattern_and_reports_the_byte_count() {
    let root = tempfile::tempdir().unwrap();
    let input = write_file(root.path(), "in.pdf", b"%PDF-1.7\nSECRET DATA");
    let output = root.path().join("out.pdf");

    let plan = parse_plan(r#"{"redactions":["SECRET"]}"#).unwrap();
    let report = redact_file(&input, &output, &plan).unwrap();

    let contents = std::fs::read(&output).unwrap();
    assert!(contents.starts_with(b"%PDF-1.7\nXXXXXX DATA"));
    assert_eq!(report.match_count, 1);
    assert_eq!(report.bytes_redacted, 6);
}

#[test]
fn rejects_a_file_without_a_pdf_header() {
    let root = tempfile::tempdir().unwrap();
    let input = write_file(root.path(), "in.pdf", b"not a pdf at all");
    let output = root.path().join("out.pdf");

    let plan = parse_plan(r#"{"redactions":["SECRET"]}"#).unwrap();
    assert!(redact_file(&input, &output, &plan).is_err());
}
