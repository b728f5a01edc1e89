// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::http::response::Response;

/// `GET /health`: always unauthenticated, always 200 (spec §4.5.2, S6).
pub fn handle() -> Response {
    Response::text(200, "OK", "ok\n")
}
