// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pdfq-server: the HTTP front end onto the job queue (spec §4.5).
//!
//! The source forks a process per connection; here a `tokio::spawn`ed task
//! plays that role and a `tokio::sync::Semaphore` replaces the signal-atomic
//! child counter (see [`listener`] and spec §5's REDESIGN note). Everything
//! else — the claim linearisation point, the rollback policy, the wire-level
//! parsing rules — carries over unchanged.

pub mod auth;
pub mod body;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod listener;
pub mod multipart;
pub mod path_safety;
pub mod routes;

pub use config::{Cli, Config};
pub use context::ServerContext;
pub use error::{ServerError, ServerResult};
pub use listener::Listener;
