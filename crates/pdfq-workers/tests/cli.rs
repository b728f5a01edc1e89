//! Black-box CLI specs for the worker binaries (spec §4.6, §6 exit codes).

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use assert_cmd::Command;

fn init_queue(root: &std::path::Path) {
    for dir in ["jobs", "priority_jobs", "complete", "error"] {
        std::fs::create_dir_all(root.join(dir)).expect("create queue dir");
    }
}

#[test]
fn ocr_worker_exits_no_job_on_an_empty_queue() {
    let root = tempfile::tempdir().unwrap();
    init_queue(root.path());

    Command::cargo_bin("pdfq-ocr-worker")
        .unwrap()
        .arg(root.path())
        .assert()
        .code(2);
}

#[test]
fn accessibility_worker_exits_no_job_on_an_empty_queue() {
    let root = tempfile::tempdir().unwrap();
    init_queue(root.path());

    Command::cargo_bin("pdfq-accessibility-worker")
        .unwrap()
        .arg(root.path())
        .assert()
        .code(2);
}

#[test]
fn redact_worker_exits_no_job_on_an_empty_queue() {
    let root = tempfile::tempdir().unwrap();
    init_queue(root.path());

    Command::cargo_bin("pdfq-redact-worker")
        .unwrap()
        .arg(root.path())
        .assert()
        .code(2);
}

#[test]
fn ocr_worker_claims_and_completes_a_submitted_job() {
    let root = tempfile::tempdir().unwrap();
    init_queue(root.path());

    let pdf_src = root.path().join("in.pdf");
    std::fs::write(&pdf_src, b"%PDF-1.7\nno markers here").unwrap();
    let meta_src = root.path().join("in.meta");
    std::fs::write(&meta_src, b"{}").unwrap();

    let queue = pdfq_queue::Queue::new(root.path());
    queue.submit(&pdfq_core::JobId::new("u1"), &pdf_src, &meta_src, false).unwrap();

    Command::cargo_bin("pdfq-ocr-worker")
        .unwrap()
        .arg(root.path())
        .assert()
        .success();

    assert!(root.path().join("complete/u1.pdf.job").exists());
    assert!(root.path().join("complete/u1.metadata.job").exists());
}
