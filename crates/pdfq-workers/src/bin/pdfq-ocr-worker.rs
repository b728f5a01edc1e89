// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OCR worker (spec §4.6): claim → run the default OCR provider → overwrite
//! metadata with the report → finalize.

use std::process::ExitCode;

use clap::Parser;
use pdfq_core::{job_path, Kind, Lock};
use pdfq_queue::Queue;
use pdfq_scan::{scan_ocr, ProviderRegistry};
use pdfq_workers::{error_metadata_json, init_logging, terminal_state, WorkerArgs, EXIT_FAILURE, EXIT_NO_JOB, EXIT_SUCCESS};
use tracing::{error, info};

fn main() -> ExitCode {
    init_logging();
    let args = WorkerArgs::parse();
    let queue = Queue::new(&args.root);

    let (uuid, from) = match queue.claim_next(args.prefer_priority) {
        Ok(pair) => pair,
        Err(pdfq_queue::QueueError::NotFound(_)) => {
            info!("no claimable job");
            return ExitCode::from(EXIT_NO_JOB as u8);
        }
        Err(e) => {
            error!(error = %e, "claim_next failed");
            return ExitCode::from(EXIT_FAILURE as u8);
        }
    };

    let pdf_locked = job_path(&args.root, from, &uuid, Kind::Pdf, Lock::Locked);
    let meta_locked = job_path(&args.root, from, &uuid, Kind::Metadata, Lock::Locked);

    let registry = ProviderRegistry::default();
    let outcome = scan_ocr(&registry, None, &pdf_locked);
    let success = outcome.is_ok();

    let metadata_body = match &outcome {
        Ok(report) => match report.to_json() {
            Ok(json) => json,
            Err(e) => error_metadata_json(e.kind(), &e.to_string()),
        },
        Err(e) => error_metadata_json(e.kind(), &e.to_string()),
    };
    if let Err(e) = std::fs::write(&meta_locked, metadata_body) {
        error!(error = %e, "failed to write metadata");
        return ExitCode::from(EXIT_FAILURE as u8);
    }

    let to = terminal_state(success);
    if let Err(e) = queue.finalize(&uuid, from, to) {
        error!(error = %e, "finalize failed");
        return ExitCode::from(EXIT_FAILURE as u8);
    }

    info!(%uuid, %to, "ocr scan complete");
    ExitCode::from(if success { EXIT_SUCCESS } else { EXIT_FAILURE } as u8)
}
