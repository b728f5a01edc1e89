// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! multipart/form-data parsing for `POST /upload` (spec §4.5.5).
//!
//! Parts are parsed sequentially: `--<boundary>\r\n`, headers terminated by
//! `\r\n\r\n`, then body up to the next boundary marker. No streaming; the
//! whole body has already been read into memory by the caller (bounded by
//! the 10 MiB upload limit).

use crate::error::{ServerError, ServerResult};

pub struct Part {
    pub name: String,
    pub filename: Option<String>,
    pub body: Vec<u8>,
}

/// Extracts the `boundary=` parameter from a `Content-Type` header value.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type.split(';').map(str::trim).find_map(|seg| {
        let rest = seg.strip_prefix("boundary=")?;
        Some(rest.trim_matches('"').to_string())
    })
}

pub fn parse_multipart(body: &[u8], boundary: &str) -> ServerResult<Vec<Part>> {
    let delim = format!("--{boundary}").into_bytes();
    let mut parts = Vec::new();
    let mut pos = find(body, &delim, 0).ok_or_else(|| ServerError::Parse("missing multipart boundary".into()))?;
    pos += delim.len();

    loop {
        if body.get(pos..pos + 2) == Some(b"--") {
            break;
        }
        pos = skip_crlf(body, pos);

        let header_end = find(body, b"\r\n\r\n", pos).ok_or_else(|| ServerError::Parse("unterminated part headers".into()))?;
        let header_block = &body[pos..header_end];
        let (name, filename) = parse_content_disposition(header_block)?;
        let body_start = header_end + 4;

        let next_boundary = find(body, &delim, body_start).ok_or_else(|| ServerError::Parse("unterminated multipart body".into()))?;
        let mut body_end = next_boundary;
        if body_end >= 2 && &body[body_end - 2..body_end] == b"\r\n" {
            body_end -= 2;
        }

        parts.push(Part {
            name,
            filename,
            body: body[body_start..body_end].to_vec(),
        });

        pos = next_boundary + delim.len();
    }

    Ok(parts)
}

fn skip_crlf(body: &[u8], pos: usize) -> usize {
    if body.get(pos..pos + 2) == Some(b"\r\n") {
        pos + 2
    } else {
        pos
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..].windows(needle.len()).position(|w| w == needle).map(|i| i + from)
}

fn parse_content_disposition(header_block: &[u8]) -> ServerResult<(String, Option<String>)> {
    let text = String::from_utf8_lossy(header_block);
    let disposition_line = text
        .lines()
        .find(|l| l.to_ascii_lowercase().starts_with("content-disposition:"))
        .ok_or_else(|| ServerError::Parse("missing Content-Disposition".into()))?;

    let name = extract_quoted_param(disposition_line, "name=").ok_or_else(|| ServerError::Parse("missing name= in part".into()))?;
    let filename = extract_quoted_param(disposition_line, "filename=");
    Ok((name, filename))
}

fn extract_quoted_param(line: &str, key: &str) -> Option<String> {
    let idx = line.find(key)?;
    let rest = &line[idx + key.len()..];
    let rest = rest.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

/// Finds the first part with the given field `name` and returns its body as
/// a trimmed UTF-8 string, or `None` if absent.
pub fn field_text<'a>(parts: &'a [Part], name: &str) -> Option<String> {
    parts
        .iter()
        .find(|p| p.name == name)
        .map(|p| String::from_utf8_lossy(&p.body).trim().to_string())
}

pub fn field_file<'a>(parts: &'a [Part], name: &str) -> Option<&'a Part> {
    parts.iter().find(|p| p.name == name)
}
