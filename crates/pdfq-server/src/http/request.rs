// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request-line and header parsing off a raw socket (spec §4.5.1).

use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::{timeout, Instant};

use crate::config::{HEADERS_TIMEOUT_SECS, MAX_HEADER_LINES, MAX_REQUEST_HEADER_BYTES, REQUEST_LINE_TIMEOUT_SECS};
use crate::error::{ServerError, ServerResult};

#[derive(Debug)]
pub struct RawRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub version: String,
    pub headers: Vec<(String, String)>,
    /// Bytes already read past the `\r\n\r\n` terminator (start of a body).
    pub trailing: Vec<u8>,
}

impl RawRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

/// Reads a request line plus headers from `stream`, enforcing the timeout
/// and size rules of spec §4.5.1. Does not read the body.
pub async fn read_request(stream: &mut TcpStream) -> ServerResult<RawRequest> {
    let start = Instant::now();
    let mut buf: Vec<u8> = Vec::with_capacity(4096);
    let mut terminator_at = None;

    loop {
        if buf.len() > MAX_REQUEST_HEADER_BYTES {
            return Err(ServerError::TooLarge);
        }

        let line_deadline = start + Duration::from_secs(REQUEST_LINE_TIMEOUT_SECS);
        let headers_deadline = start + Duration::from_secs(HEADERS_TIMEOUT_SECS);
        let have_line = buf.windows(2).any(|w| w == b"\r\n");
        let deadline = if have_line { headers_deadline } else { line_deadline };

        let mut chunk = [0u8; 2048];
        let n = match timeout(deadline.saturating_duration_since(Instant::now()), stream.read(&mut chunk)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(ServerError::Io(e)),
            Err(_) => return Err(ServerError::Timeout),
        };
        if n == 0 {
            return Err(ServerError::Parse("connection closed before headers completed".into()));
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            terminator_at = Some(pos);
            break;
        }
    }

    let pos = terminator_at.expect("loop only exits with a terminator position");
    let header_block = &buf[..pos];
    let trailing = buf[pos + 4..].to_vec();

    parse_header_block(header_block, trailing)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn parse_header_block(block: &[u8], trailing: Vec<u8>) -> ServerResult<RawRequest> {
    let text = std::str::from_utf8(block).map_err(|_| ServerError::Parse("request is not valid UTF-8".into()))?;
    let mut lines = text.split("\r\n");
    let request_line = lines.next().ok_or_else(|| ServerError::Parse("missing request line".into()))?;

    if request_line.bytes().any(|b| b.is_ascii_control()) {
        return Err(ServerError::Parse("control character in request line".into()));
    }

    let mut parts = request_line.split(' ');
    let method = parts.next().ok_or_else(|| ServerError::Parse("missing method".into()))?.to_string();
    let target = parts.next().ok_or_else(|| ServerError::Parse("missing request target".into()))?;
    let version = parts.next().ok_or_else(|| ServerError::Parse("missing HTTP version".into()))?.to_string();
    if parts.next().is_some() {
        return Err(ServerError::Parse("malformed request line".into()));
    }
    if version != "HTTP/1.0" && version != "HTTP/1.1" {
        return Err(ServerError::Parse(format!("unsupported version: {version}")));
    }

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target.to_string(), String::new()),
    };
    let path = url_decode(&path);

    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        if headers.len() >= MAX_HEADER_LINES {
            return Err(ServerError::Parse("too many header lines".into()));
        }
        if line.bytes().any(|b| b.is_ascii_control() && b != b'\t') {
            return Err(ServerError::Parse("control character in header line".into()));
        }
        let (name, value) = line.split_once(':').ok_or_else(|| ServerError::Parse(format!("malformed header: {line}")))?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    Ok(RawRequest { method, path, query, version, headers, trailing })
}

/// Percent-decodes a URL path component.
pub fn url_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                if let Some(decoded) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    out.push(decoded);
                    i += 3;
                } else {
                    out.push(bytes[i]);
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Splits a query string into key/value pairs, both percent-decoded.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    if query.is_empty() {
        return Vec::new();
    }
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (url_decode(k), url_decode(v)),
            None => (url_decode(pair), String::new()),
        })
        .collect()
}
