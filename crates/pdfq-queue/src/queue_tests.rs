// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::io::fake::FakeQueueIo;
use pdfq_core::JobId;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, Queue<FsQueueIo>) {
    let dir = TempDir::new().expect("tempdir");
    let queue = Queue::new(dir.path());
    queue.init().expect("init");
    (dir, queue)
}

fn write_source_pair(dir: &TempDir, pdf_body: &[u8], meta_body: &[u8]) -> (PathBuf, PathBuf) {
    let pdf = dir.path().join("src.pdf");
    let meta = dir.path().join("src.meta");
    fs::write(&pdf, pdf_body).expect("write pdf");
    fs::write(&meta, meta_body).expect("write meta");
    (pdf, meta)
}

#[test]
fn init_creates_four_directories() {
    let (dir, _queue) = setup();
    for name in ["jobs", "priority_jobs", "complete", "error"] {
        assert!(dir.path().join(name).is_dir());
    }
}

#[test]
fn init_is_idempotent() {
    let (_dir, queue) = setup();
    queue.init().expect("second init should not fail");
}

#[test]
fn submit_creates_live_pair_in_jobs() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();

    queue.submit(&uuid, &pdf, &meta, false).expect("submit");

    assert!(dir.path().join("jobs/u1.pdf.job").exists());
    assert!(dir.path().join("jobs/u1.metadata.job").exists());
}

#[test]
fn submit_respects_priority_flag() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();

    queue.submit(&uuid, &pdf, &meta, true).expect("submit");

    assert!(dir.path().join("priority_jobs/u1.pdf.job").exists());
    assert!(!dir.path().join("jobs/u1.pdf.job").exists());
}

#[test]
fn submit_fails_when_pdf_source_missing() {
    let (dir, queue) = setup();
    let meta = dir.path().join("src.meta");
    fs::write(&meta, b"{}").unwrap();
    let uuid = JobId::parse("u1").unwrap();

    let err = queue
        .submit(&uuid, &dir.path().join("missing.pdf"), &meta, false)
        .unwrap_err();
    assert!(matches!(err, QueueError::NotFound(_)));
}

#[test]
fn submit_unlinks_pdf_copy_if_metadata_copy_fails() {
    let (dir, queue) = setup();
    let (pdf, _meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();

    let err = queue
        .submit(&uuid, &pdf, &dir.path().join("missing.meta"), false)
        .unwrap_err();
    assert!(matches!(err, QueueError::NotFound(_)));
    assert!(!dir.path().join("jobs/u1.pdf.job").exists());
}

#[test]
fn claim_next_claims_submitted_job() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();
    queue.submit(&uuid, &pdf, &meta, false).unwrap();

    let (claimed, state) = queue.claim_next(false).expect("claim");
    assert_eq!(claimed, uuid);
    assert_eq!(state, State::Jobs);
    assert!(dir.path().join("jobs/u1.pdf.job.lock").exists());
    assert!(dir.path().join("jobs/u1.metadata.job.lock").exists());
    assert!(!dir.path().join("jobs/u1.pdf.job").exists());
}

#[test]
fn claim_next_returns_not_found_when_empty() {
    let (_dir, queue) = setup();
    let err = queue.claim_next(false).unwrap_err();
    assert!(matches!(err, QueueError::NotFound(_)));
}

#[test]
fn claim_next_prefers_priority_when_requested() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let regular = JobId::parse("reg").unwrap();
    queue.submit(&regular, &pdf, &meta, false).unwrap();
    let priority = JobId::parse("pri").unwrap();
    queue.submit(&priority, &pdf, &meta, true).unwrap();

    let (claimed, state) = queue.claim_next(true).expect("claim");
    assert_eq!(claimed, priority);
    assert_eq!(state, State::PriorityJobs);
}

#[test]
fn claim_next_prefers_regular_when_not_priority() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let regular = JobId::parse("reg").unwrap();
    queue.submit(&regular, &pdf, &meta, false).unwrap();
    let priority = JobId::parse("pri").unwrap();
    queue.submit(&priority, &pdf, &meta, true).unwrap();

    let (claimed, state) = queue.claim_next(false).expect("claim");
    assert_eq!(claimed, regular);
    assert_eq!(state, State::Jobs);
}

#[test]
fn claim_next_skips_orphan_pdf_without_metadata() {
    let (dir, queue) = setup();
    fs::write(dir.path().join("jobs/orphan.pdf.job"), b"%PDF-1.6\n").unwrap();
    let err = queue.claim_next(false).unwrap_err();
    assert!(matches!(err, QueueError::NotFound(_)));
}

#[test]
fn release_returns_locked_job_to_live() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();
    queue.submit(&uuid, &pdf, &meta, false).unwrap();
    let (_, state) = queue.claim_next(false).unwrap();

    queue.release(&uuid, state).expect("release");

    assert!(dir.path().join("jobs/u1.pdf.job").exists());
    assert!(dir.path().join("jobs/u1.metadata.job").exists());
    assert!(!dir.path().join("jobs/u1.pdf.job.lock").exists());
}

#[test]
fn release_fails_if_not_locked() {
    let (_dir, queue) = setup();
    let uuid = JobId::parse("nope").unwrap();
    let err = queue.release(&uuid, State::Jobs).unwrap_err();
    assert!(matches!(err, QueueError::NotFound(_)));
}

#[test]
fn finalize_moves_locked_job_to_complete() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();
    queue.submit(&uuid, &pdf, &meta, false).unwrap();
    queue.claim_next(false).unwrap();

    queue
        .finalize(&uuid, State::Jobs, State::Complete)
        .expect("finalize");

    assert!(dir.path().join("complete/u1.pdf.job").exists());
    assert!(dir.path().join("complete/u1.metadata.job").exists());
    assert!(!dir.path().join("jobs/u1.pdf.job.lock").exists());
}

#[test]
fn submit_claim_finalize_round_trip() {
    // Testable property 3 (spec §8).
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();

    queue.submit(&uuid, &pdf, &meta, false).unwrap();
    let (claimed, state) = queue.claim_next(false).unwrap();
    assert_eq!(claimed, uuid);
    queue.finalize(&uuid, state, State::Complete).unwrap();

    assert!(dir.path().join("complete/u1.pdf.job").exists());
    assert!(dir.path().join("complete/u1.metadata.job").exists());
    assert!(!dir.path().join("jobs/u1.pdf.job").exists());
    assert!(!dir.path().join("jobs/u1.metadata.job").exists());
}

#[test]
fn status_reports_live_unlocked() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();
    queue.submit(&uuid, &pdf, &meta, false).unwrap();

    let (state, locked) = queue.status(&uuid).expect("status");
    assert_eq!(state, State::Jobs);
    assert!(!locked);
}

#[test]
fn status_reports_locked_after_claim() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();
    queue.submit(&uuid, &pdf, &meta, false).unwrap();
    queue.claim_next(false).unwrap();

    let (state, locked) = queue.status(&uuid).expect("status");
    assert_eq!(state, State::Jobs);
    assert!(locked);
}

#[test]
fn status_searches_priority_jobs_before_jobs() {
    // Documented open question (spec §9): priority_jobs is probed first.
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("dup").unwrap();
    fs::create_dir_all(dir.path().join("jobs")).unwrap();
    fs::create_dir_all(dir.path().join("priority_jobs")).unwrap();
    fs::copy(&pdf, dir.path().join("jobs/dup.pdf.job")).unwrap();
    fs::copy(&meta, dir.path().join("jobs/dup.metadata.job")).unwrap();
    fs::copy(&pdf, dir.path().join("priority_jobs/dup.pdf.job")).unwrap();
    fs::copy(&meta, dir.path().join("priority_jobs/dup.metadata.job")).unwrap();

    let (state, _locked) = queue.status(&uuid).expect("status");
    assert_eq!(state, State::PriorityJobs);
}

#[test]
fn status_not_found_for_unknown_uuid() {
    let (_dir, queue) = setup();
    let uuid = JobId::parse("ghost").unwrap();
    assert!(matches!(queue.status(&uuid), Err(QueueError::NotFound(_))));
}

#[test]
fn move_job_relocates_live_pair() {
    let (dir, queue) = setup();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();
    queue.submit(&uuid, &pdf, &meta, false).unwrap();

    queue
        .move_job(&uuid, State::Jobs, State::PriorityJobs)
        .expect("move");

    assert!(dir.path().join("priority_jobs/u1.pdf.job").exists());
    assert!(!dir.path().join("jobs/u1.pdf.job").exists());
}

#[test]
fn release_reverts_pdf_rename_when_metadata_rename_fails() {
    let dir = TempDir::new().unwrap();
    let io = FakeQueueIo::new();
    let queue = Queue::with_io(dir.path(), io);
    queue.init().unwrap();
    let (pdf, meta) = write_source_pair(&dir, b"%PDF-1.6\n", b"{}");
    let uuid = JobId::parse("u1").unwrap();
    queue.submit(&uuid, &pdf, &meta, false).unwrap();
    queue.claim_next(false).unwrap();

    let meta_locked = dir.path().join("jobs/u1.metadata.job.lock");
    let meta_live = dir.path().join("jobs/u1.metadata.job");
    queue.io().fail_next_rename_from(&meta_locked);
    let _ = meta_live;

    let err = queue.release(&uuid, State::Jobs).unwrap_err();
    assert!(matches!(err, QueueError::Io(_)));
    // Rollback restored the pdf to its locked form.
    assert!(dir.path().join("jobs/u1.pdf.job.lock").exists());
    assert!(!dir.path().join("jobs/u1.pdf.job").exists());
}
