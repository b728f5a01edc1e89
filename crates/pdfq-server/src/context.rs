// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared per-server state handed to every connection task, mirroring the
//! teacher's `ListenCtx` (one `Arc` cloned into each spawned connection).

use std::path::PathBuf;
use std::time::Instant;

use pdfq_queue::Queue;

use crate::error::{ServerError, ServerResult};

pub struct ServerContext {
    pub root: PathBuf,
    pub queue: Queue,
    pub token: Option<String>,
    pub start_time: Instant,
    pub bind: String,
    pub port: u16,
}

impl ServerContext {
    pub fn new(root: PathBuf, token: Option<String>, bind: String, port: u16) -> Self {
        let queue = Queue::new(&root);
        ServerContext { root, queue, token, start_time: Instant::now(), bind, port }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Runs a blocking closure on the tokio blocking-thread pool (spec §5
/// redesign note: filesystem rename/read/write calls move off the
/// connection task the way the source's fork model kept them off the
/// parent's accept loop).
pub async fn blocking<F, T>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(_) => Err(ServerError::Io(std::io::Error::other("blocking task panicked"))),
    }
}
