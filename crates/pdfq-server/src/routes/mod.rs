// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route dispatch (spec §4.5.3): URL-decode, split query, authorise, match
//! method + path.

pub mod health;
pub mod metrics;
pub mod panel;
pub mod queue_ops;
pub mod upload;

use std::collections::HashMap;

use crate::auth::is_authorized;
use crate::context::ServerContext;
use crate::error::ServerError;
use crate::http::request::{parse_query, RawRequest};
use crate::http::response::Response;

pub fn query_map(req: &RawRequest) -> HashMap<String, String> {
    parse_query(&req.query).into_iter().collect()
}

pub async fn dispatch(req: RawRequest, body: Vec<u8>, ctx: &ServerContext) -> Response {
    if req.path == "/health" {
        return health::handle();
    }

    let query = query_map(&req);
    let query_token = query.get("token").map(String::as_str);
    if !is_authorized(ctx.token.as_deref(), req.header("authorization"), query_token) {
        return Response::from_error(&ServerError::Unauthorized);
    }

    let result = match (req.method.as_str(), req.path.as_str()) {
        ("GET", "/metrics") => metrics::handle(ctx).await,
        ("GET", "/") | ("GET", "/panel") => panel::handle(),
        ("GET", "/submit") => queue_ops::submit(&query, ctx).await,
        ("POST", "/upload") => upload::handle(&req, body, ctx).await,
        ("GET", "/claim") => queue_ops::claim(&query, ctx).await,
        ("GET", "/release") => queue_ops::release(&query, ctx).await,
        ("GET", "/finalize") => queue_ops::finalize(&query, ctx).await,
        ("GET", "/move") => queue_ops::move_job(&query, ctx).await,
        ("GET", "/status") => queue_ops::status(&query, ctx).await,
        ("GET", "/retrieve") => queue_ops::retrieve(&query, ctx).await,
        (_, "/health" | "/metrics" | "/" | "/panel" | "/submit" | "/upload" | "/claim" | "/release" | "/finalize" | "/move" | "/status" | "/retrieve") => {
            Err(ServerError::MethodNotAllowed)
        }
        _ => Err(ServerError::RouteNotFound),
    };

    match result {
        Ok(resp) => resp,
        Err(e) => Response::from_error(&e),
    }
}
