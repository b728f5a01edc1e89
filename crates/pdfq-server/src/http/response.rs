// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response assembly (spec §6): every response carries `Content-Type`,
//! `Content-Length`, and `Connection: close`.

use crate::error::ServerError;

pub struct Response {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, reason: &'static str, content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Response { status, reason, content_type, body: body.into() }
    }

    pub fn text(status: u16, reason: &'static str, body: impl Into<String>) -> Self {
        Response::new(status, reason, "text/plain; charset=utf-8", body.into().into_bytes())
    }

    pub fn json(status: u16, reason: &'static str, body: String) -> Self {
        Response::new(status, reason, "application/json", body.into_bytes())
    }

    pub fn html(status: u16, reason: &'static str, body: impl Into<String>) -> Self {
        Response::new(status, reason, "text/html; charset=utf-8", body.into().into_bytes())
    }

    pub fn from_error(err: &ServerError) -> Self {
        let status = err.status();
        let reason = err.reason();
        let body = serde_json::json!({ "error": err.to_string() }).to_string();
        Response::json(status, reason, body)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 128);
        out.extend_from_slice(format!("HTTP/1.1 {} {}\r\n", self.status, self.reason).as_bytes());
        out.extend_from_slice(format!("Content-Type: {}\r\n", self.content_type).as_bytes());
        out.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        out.extend_from_slice(b"Connection: close\r\n\r\n");
        out.extend_from_slice(&self.body);
        out
    }
}
