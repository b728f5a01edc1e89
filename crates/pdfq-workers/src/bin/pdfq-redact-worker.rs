// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redaction worker (spec §4.6, §4.3): claim → parse the plan out of the
//! job's own metadata document → stream-redact the locked PDF in place →
//! overwrite metadata with the report → finalize.

use std::process::ExitCode;

use clap::Parser;
use pdfq_core::{job_path, Kind, Lock};
use pdfq_queue::Queue;
use pdfq_redact::{parse_plan, redact_file, RedactError};
use pdfq_workers::{error_metadata_json, init_logging, terminal_state, WorkerArgs, EXIT_FAILURE, EXIT_NO_JOB, EXIT_SUCCESS};
use tracing::{error, info};

fn run(args: &WorkerArgs, queue: &Queue) -> Result<(pdfq_core::JobId, pdfq_core::State, pdfq_core::State), ExitCode> {
    let (uuid, from) = match queue.claim_next(args.prefer_priority) {
        Ok(pair) => pair,
        Err(pdfq_queue::QueueError::NotFound(_)) => {
            info!("no claimable job");
            return Err(ExitCode::from(EXIT_NO_JOB as u8));
        }
        Err(e) => {
            error!(error = %e, "claim_next failed");
            return Err(ExitCode::from(EXIT_FAILURE as u8));
        }
    };

    let pdf_locked = job_path(&args.root, from, &uuid, Kind::Pdf, Lock::Locked);
    let meta_locked = job_path(&args.root, from, &uuid, Kind::Metadata, Lock::Locked);

    let outcome = redact_locked_pdf(&meta_locked, &pdf_locked);
    let success = outcome.is_ok();

    let metadata_body = match &outcome {
        Ok(report) => report.to_json(),
        Err(e) => error_metadata_json(e.kind(), &e.to_string()),
    };
    if let Err(e) = std::fs::write(&meta_locked, metadata_body) {
        error!(error = %e, "failed to write metadata");
        return Err(ExitCode::from(EXIT_FAILURE as u8));
    }

    let to = terminal_state(success);
    Ok((uuid, from, to))
}

fn redact_locked_pdf(meta_locked: &std::path::Path, pdf_locked: &std::path::Path) -> Result<pdfq_redact::Report, RedactError> {
    let metadata = std::fs::read_to_string(meta_locked)?;
    let plan = parse_plan(&metadata)?;

    let tmp_path = pdf_locked.with_extension("redact.tmp");
    let report = redact_file(pdf_locked, &tmp_path, &plan);
    match report {
        Ok(report) => {
            std::fs::rename(&tmp_path, pdf_locked)?;
            Ok(report)
        }
        Err(e) => {
            let _ = std::fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = WorkerArgs::parse();
    let queue = Queue::new(&args.root);

    let (uuid, from, to) = match run(&args, &queue) {
        Ok(triple) => triple,
        Err(code) => return code,
    };

    if let Err(e) = queue.finalize(&uuid, from, to) {
        error!(error = %e, "finalize failed");
        return ExitCode::from(EXIT_FAILURE as u8);
    }

    let success = to == pdfq_core::State::Complete;
    info!(%uuid, %to, "redaction complete");
    ExitCode::from(if success { EXIT_SUCCESS } else { EXIT_FAILURE } as u8)
}
