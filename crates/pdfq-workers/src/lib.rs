// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Shared scaffolding for the three single-shot worker binaries (spec §4.6):
//! thin mains structured like `oj-daemon`'s startup shape, but claim-once-
//! run-once-exit instead of long-lived. CLI parsing and output formatting of
//! these binaries are explicitly out of scope for fidelity (spec §1
//! Non-goals); they exist so the pipeline is runnable end to end.

use std::path::PathBuf;

use clap::Parser;
use pdfq_core::State;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Shared CLI surface for all three worker binaries: `<root> [--prefer-priority]`.
#[derive(Debug, Parser)]
pub struct WorkerArgs {
    /// Root directory of the job queue.
    pub root: PathBuf,

    /// Prefer `priority_jobs` over `jobs` when claiming (spec §4.2 `claim_next`).
    #[arg(long)]
    pub prefer_priority: bool,
}

/// Worker binary exit codes (spec §6).
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_NO_JOB: i32 = 2;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Error-metadata JSON written on worker failure (spec §6): `{"error":"<kind>","detail":"<msg>"}`.
pub fn error_metadata_json(kind: &str, detail: &str) -> String {
    json!({ "error": kind, "detail": detail }).to_string()
}

/// The terminal state a worker finalizes into, given success or failure.
pub fn terminal_state(success: bool) -> State {
    if success {
        State::Complete
    } else {
        State::Error
    }
}
