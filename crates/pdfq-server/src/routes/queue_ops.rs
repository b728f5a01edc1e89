// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue-operation endpoints (spec §4.5.3): submit, claim, release,
//! finalize, move, status, retrieve. Each thinly wraps a `pdfq_queue::Queue`
//! call, running it on the blocking pool.

use std::collections::HashMap;

use pdfq_core::{job_path, JobId, Kind, Lock, State};
use pdfq_queue::Queue;

use crate::context::{blocking, ServerContext};
use crate::error::{ServerError, ServerResult};
use crate::http::response::Response;
use crate::path_safety::confine_existing;

fn required<'a>(query: &'a HashMap<String, String>, key: &str) -> ServerResult<&'a str> {
    query.get(key).map(String::as_str).filter(|v| !v.is_empty()).ok_or_else(|| ServerError::InvalidArgument(format!("missing query param: {key}")))
}

fn parse_uuid(query: &HashMap<String, String>) -> ServerResult<JobId> {
    JobId::parse(required(query, "uuid")?).map_err(ServerError::from)
}

fn parse_state(query: &HashMap<String, String>, key: &str) -> ServerResult<State> {
    State::parse(required(query, key)?).map_err(ServerError::from)
}

fn truthy(v: Option<&String>) -> bool {
    matches!(v.map(String::as_str), Some("1") | Some("true") | Some("yes"))
}

pub async fn submit(query: &HashMap<String, String>, ctx: &ServerContext) -> ServerResult<Response> {
    let uuid = parse_uuid(query)?;
    let pdf_rel = required(query, "pdf")?.to_string();
    let meta_rel = required(query, "metadata")?.to_string();
    let priority = truthy(query.get("priority"));

    let root = ctx.root.clone();
    let pdf_path = confine_existing(&root, &pdf_rel)?;
    let meta_path = confine_existing(&root, &meta_rel)?;

    blocking(move || {
        let queue = Queue::new(&root);
        queue.submit(&uuid, &pdf_path, &meta_path, priority).map_err(ServerError::from)
    })
    .await?;

    Ok(Response::text(200, "OK", "ok\n"))
}

pub async fn claim(query: &HashMap<String, String>, ctx: &ServerContext) -> ServerResult<Response> {
    let prefer_priority = truthy(query.get("prefer_priority"));
    let root = ctx.root.clone();

    let (uuid, state) = blocking(move || {
        let queue = Queue::new(&root);
        queue.claim_next(prefer_priority).map_err(ServerError::from)
    })
    .await?;

    Ok(Response::text(200, "OK", format!("{uuid} {state}\n")))
}

pub async fn release(query: &HashMap<String, String>, ctx: &ServerContext) -> ServerResult<Response> {
    let uuid = parse_uuid(query)?;
    let state = parse_state(query, "state")?;
    let root = ctx.root.clone();

    blocking(move || {
        let queue = Queue::new(&root);
        queue.release(&uuid, state).map_err(ServerError::from)
    })
    .await?;

    Ok(Response::text(200, "OK", "ok\n"))
}

pub async fn finalize(query: &HashMap<String, String>, ctx: &ServerContext) -> ServerResult<Response> {
    let uuid = parse_uuid(query)?;
    let from = parse_state(query, "from")?;
    let to = parse_state(query, "to")?;
    let root = ctx.root.clone();

    blocking(move || {
        let queue = Queue::new(&root);
        queue.finalize(&uuid, from, to).map_err(ServerError::from)
    })
    .await?;

    Ok(Response::text(200, "OK", "ok\n"))
}

pub async fn move_job(query: &HashMap<String, String>, ctx: &ServerContext) -> ServerResult<Response> {
    let uuid = parse_uuid(query)?;
    let from = parse_state(query, "from")?;
    let to = parse_state(query, "to")?;
    let root = ctx.root.clone();

    blocking(move || {
        let queue = Queue::new(&root);
        queue.move_job(&uuid, from, to).map_err(ServerError::from)
    })
    .await?;

    Ok(Response::text(200, "OK", "ok\n"))
}

pub async fn status(query: &HashMap<String, String>, ctx: &ServerContext) -> ServerResult<Response> {
    let uuid = parse_uuid(query)?;
    let root = ctx.root.clone();

    let (state, locked) = blocking(move || {
        let queue = Queue::new(&root);
        queue.status(&uuid).map_err(ServerError::from)
    })
    .await?;

    Ok(Response::text(200, "OK", format!("state={state} locked={}\n", locked as u8)))
}

pub async fn retrieve(query: &HashMap<String, String>, ctx: &ServerContext) -> ServerResult<Response> {
    let uuid = parse_uuid(query)?;
    let state = parse_state(query, "state")?;
    let kind = Kind::parse(required(query, "kind")?).map_err(ServerError::from)?;

    let path = job_path(&ctx.root, state, &uuid, kind, Lock::Live);
    let content_type = match kind {
        Kind::Pdf => "application/pdf",
        Kind::Metadata => "application/json",
        Kind::Report => "text/html",
    };

    let body = blocking(move || std::fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ServerError::NotFound("no such job artifact".into())
        } else {
            ServerError::Io(e)
        }
    }))
    .await?;

    Ok(Response::new(200, "OK", content_type, body))
}
