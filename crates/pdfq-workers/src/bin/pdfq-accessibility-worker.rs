// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Accessibility worker (spec §4.6): claim → scan → write report + metadata
//! → finalize. The only worker that writes the optional HTML report
//! artifact (spec §3).

use std::process::ExitCode;

use clap::Parser;
use pdfq_core::{job_path, Kind, Lock};
use pdfq_queue::Queue;
use pdfq_scan::{scan_accessibility, AccessibilityReport};
use pdfq_workers::{error_metadata_json, init_logging, terminal_state, WorkerArgs, EXIT_FAILURE, EXIT_NO_JOB, EXIT_SUCCESS};
use tracing::{error, info};

fn render_html(report: &AccessibilityReport) -> String {
    let issues: String = report
        .issues
        .iter()
        .map(|i| format!("<li>{i}</li>"))
        .collect::<Vec<_>>()
        .join("");
    format!(
        "<!doctype html><html><head><title>Accessibility report</title></head><body>\
         <h1>Accessibility report</h1><p>PDF version: {}</p>\
         <ul><li>has_mark_info: {}</li><li>is_marked: {}</li><li>has_struct_tree: {}</li>\
         <li>has_lang: {}</li><li>has_alt_text: {}</li><li>has_display_doc_title: {}</li></ul>\
         <h2>Issues</h2><ul>{}</ul></body></html>",
        report.pdf_version,
        report.has_mark_info,
        report.is_marked,
        report.has_struct_tree,
        report.has_lang,
        report.has_alt_text,
        report.has_display_doc_title,
        issues,
    )
}

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

    let outcome = scan_accessibility(&pdf_locked);
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
    if success {
        if let Ok(report) = &outcome {
            let report_path = job_path(&args.root, to, &uuid, Kind::Report, Lock::Live);
            if let Err(e) = std::fs::write(&report_path, render_html(report)) {
                error!(error = %e, "failed to write html report");
            }
        }
    }

    if let Err(e) = queue.finalize(&uuid, from, to) {
        error!(error = %e, "finalize failed");
        return ExitCode::from(EXIT_FAILURE as u8);
    }

    info!(%uuid, %to, "accessibility scan complete");
    ExitCode::from(if success { EXIT_SUCCESS } else { EXIT_FAILURE } as u8)
}
