// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request body reading (spec §4.5.1 step 5): only `POST /upload` has a
//! body. `Content-Length` is required and capped at 10 MiB; bytes already
//! buffered past the header terminator are consumed first.

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::{MAX_UPLOAD_BYTES, READ_TIMEOUT_SECS};
use crate::error::{ServerError, ServerResult};
use crate::http::request::RawRequest;

pub async fn read_body(stream: &mut TcpStream, req: &RawRequest) -> ServerResult<Vec<u8>> {
    if !(req.method == "POST" && req.path == "/upload") {
        return Ok(Vec::new());
    }

    let content_length: u64 = req
        .header("content-length")
        .ok_or(ServerError::LengthRequired)?
        .trim()
        .parse()
        .map_err(|_| ServerError::Parse("malformed Content-Length".into()))?;

    if content_length > MAX_UPLOAD_BYTES {
        return Err(ServerError::TooLarge);
    }

    let mut body = Vec::with_capacity(content_length as usize);
    body.extend_from_slice(&req.trailing);

    while (body.len() as u64) < content_length {
        let mut chunk = [0u8; 64 * 1024];
        let remaining = (content_length - body.len() as u64).min(chunk.len() as u64) as usize;
        let n = match timeout(std::time::Duration::from_secs(READ_TIMEOUT_SECS), stream.read(&mut chunk[..remaining])).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(ServerError::Io(e)),
            Err(_) => return Err(ServerError::Timeout),
        };
        if n == 0 {
            return Err(ServerError::Parse("connection closed before body completed".into()));
        }
        body.extend_from_slice(&chunk[..n]);
    }

    body.truncate(content_length as usize);
    Ok(body)
}
