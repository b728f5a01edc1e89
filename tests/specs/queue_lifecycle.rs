//! Queue engine lifecycle: submit, claim, finalize.

use crate::prelude::write_file;
use pdfq_core::{JobId, State};
use pdfq_queue::Queue;

#[test]
fn submit_creates_live_job_pair() {
    let root = tempfile::tempdir().unwrap();
    let queue = Queue::new(root.path());
    queue.init().unwrap();

    let pdf_src = write_file(root.path(), "a.pdf", b"%PDF-1.6\nhello");
    let meta_src = write_file(root.path(), "a.meta", b"{}");

    let uuid = JobId::new("u1");
    queue.submit(&uuid, &pdf_src, &meta_src, false).unwrap();

    assert!(root.path().join("jobs/u1.pdf.job").exists());
    assert!(root.path().join("jobs/u1.metadata.job").exists());
}

#[test]
fn claim_next_locks_the_job_and_removes_live_forms() {
    let root = tempfile::tempdir().unwrap();
    let queue = Queue::new(root.path());
    queue.init().unwrap();

    let pdf_src = write_file(root.path(), "a.pdf", b"%PDF-1.6\nhello");
    let meta_src = write_file(root.path(), "a.meta", b"{}");
    let uuid = JobId::new("u1");
    queue.submit(&uuid, &pdf_src, &meta_src, false).unwrap();

    let (claimed, state) = queue.claim_next(false).unwrap();
    assert_eq!(claimed, uuid);
    assert_eq!(state, State::Jobs);

    assert!(root.path().join("jobs/u1.pdf.job.lock").exists());
    assert!(root.path().join("jobs/u1.metadata.job.lock").exists());
    assert!(!root.path().join("jobs/u1.pdf.job").exists());
    assert!(!root.path().join("jobs/u1.metadata.job").exists());
}

#[test]
fn finalize_moves_locked_job_to_complete() {
    let root = tempfile::tempdir().unwrap();
    let queue = Queue::new(root.path());
    queue.init().unwrap();

    let pdf_src = write_file(root.path(), "a.pdf", b"%PDF-1.6\nhello");
    let meta_src = write_file(root.path(), "a.meta", b"{}");
    let uuid = JobId::new("u1");
    queue.submit(&uuid, &pdf_src, &meta_src, false).unwrap();
    queue.claim_next(false).unwrap();

    queue.finalize(&uuid, State::Jobs, State::Complete).unwrap();

    assert!(root.path().join("complete/u1.pdf.job").exists());
    assert!(root.path().join("complete/u1.metadata.job").exists());
}

#[test]
fn priority_jobs_are_claimed_before_plain_jobs() {
    let root = tempfile::tempdir().unwrap();
    let queue = Queue::new(root.path());
    queue.init().unwrap();

    let pdf_src = write_file(root.path(), "a.pdf", b"%PDF-1.6\nhello");
    let meta_src = write_file(root.path(), "a.meta", b"{}");

    let plain = JobId::new("plain-one");
    queue.submit(&plain, &pdf_src, &meta_src, false).unwrap();
    let urgent = JobId::new("urgent-one");
    queue.submit(&urgent, &pdf_src, &meta_src, true).unwrap();

    let (claimed, state) = queue.claim_next(true).unwrap();
    assert_eq!(claimed, urgent);
    assert_eq!(state, State::PriorityJobs);
}
