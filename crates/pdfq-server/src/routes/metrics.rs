// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /metrics` (spec §4.5.3, §6): runs `collect_stats` and returns totals,
//! per-state counts, uptime, root, and configured limits as JSON.

use serde_json::json;

use crate::config::{MAX_ACTIVE_CONNECTIONS, MAX_UPLOAD_BYTES};
use crate::context::{blocking, ServerContext};
use crate::error::ServerResult;
use crate::http::response::Response;

fn epoch_secs(t: Option<std::time::SystemTime>) -> Option<u64> {
    t.and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok()).map(|d| d.as_secs())
}

pub async fn handle(ctx: &ServerContext) -> ServerResult<Response> {
    let queue = ctx.queue.root().to_path_buf();
    let q = pdfq_queue::Queue::new(queue);
    let stats = blocking(move || q.collect_stats().map_err(crate::error::ServerError::from)).await?;

    let body = json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "timestamp_epoch": std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
        "uptime_seconds": ctx.uptime_seconds(),
        "root": ctx.root.display().to_string(),
        "limits": {
            "max_active_connections": MAX_ACTIVE_CONNECTIONS,
            "max_upload_bytes": MAX_UPLOAD_BYTES,
        },
        "totals": {
            "files": stats.total_files,
            "locked": stats.total_locked,
            "orphans": stats.total_orphans,
            "bytes": stats.total_bytes,
            "oldest_mtime": epoch_secs(stats.oldest_mtime),
            "newest_mtime": epoch_secs(stats.newest_mtime),
        },
        "states": {
            "jobs": stats.jobs,
            "priority": stats.priority,
            "complete": stats.complete,
            "error": stats.error,
        },
    })
    .to_string();

    Ok(Response::json(200, "OK", body))
}
