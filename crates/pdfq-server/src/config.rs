// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server configuration (spec §6): `<root> <port> [--bind ADDR] [--token TOK]`,
//! with `JOB_QUEUE_TOKEN` supplying the token when the flag is absent —
//! mirroring the teacher's `env::state_dir` fallback-resolution idiom.

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const MAX_ACTIVE_CONNECTIONS: usize = 32;
pub const READ_TIMEOUT_SECS: u64 = 1;
pub const REQUEST_LINE_TIMEOUT_SECS: u64 = 2;
pub const HEADERS_TIMEOUT_SECS: u64 = 5;
pub const MAX_REQUEST_HEADER_BYTES: usize = 8 * 1024;
pub const MAX_HEADER_LINES: usize = 50;
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Parser)]
#[command(name = "pdfq-server", about = "Filesystem PDF job queue HTTP server")]
pub struct Cli {
    /// Root directory of the job queue (spec §3).
    pub root: PathBuf,

    /// TCP port to listen on.
    pub port: u16,

    /// Bind address.
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Bearer/query auth token. Falls back to `JOB_QUEUE_TOKEN` if unset.
    #[arg(long)]
    pub token: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub bind: String,
    pub port: u16,
    pub token: Option<String>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let token = cli.token.or_else(|| std::env::var("JOB_QUEUE_TOKEN").ok()).filter(|t| !t.is_empty());
        Config {
            root: cli.root,
            bind: cli.bind,
            port: cli.port,
            token,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
