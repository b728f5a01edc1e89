// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The chunked streaming redaction scanner (spec §4.3). Never loads the
//! whole file into memory: each read is at least [`MIN_CHUNK_SIZE`] bytes,
//! and a small carry buffer holds back enough trailing bytes that a literal
//! or PII match straddling a chunk boundary is never split.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::error::{RedactError, RedactResult};
use crate::pii::{match_pii, MAX_PII_MATCH_LEN};
use crate::plan::RedactionPlan;
use crate::report::Report;

pub const MIN_CHUNK_SIZE: usize = 32 * 1024;

/// Bytes held back from processing at the end of each chunk so a match that
/// starts near the boundary can still be matched in full once more bytes
/// arrive.
fn overlap_len(plan: &RedactionPlan) -> usize {
    plan.longest_pattern_len().max(MAX_PII_MATCH_LEN).saturating_sub(1)
}

/// Scans `window[..scan_limit]` left to right, overwriting any literal or
/// PII match with `'X'` in place. `window` may extend past `scan_limit`
/// (the carry-over region); matchers may read into it for boundary and
/// label lookback checks, but a match is only recorded if it starts before
/// `scan_limit`.
fn scan_and_redact(window: &mut [u8], scan_limit: usize, patterns: &[Vec<u8>], report: &mut Report) {
    let mut i = 0usize;
    while i < scan_limit {
        let mut matched_len = None;
        for pattern in patterns {
            if pattern.is_empty() {
                continue;
            }
            if window[i..].len() >= pattern.len() && &window[i..i + pattern.len()] == pattern.as_slice() {
                matched_len = Some(pattern.len());
                break;
            }
        }
        if matched_len.is_none() {
            matched_len = match_pii(window, i);
        }
        match matched_len {
            Some(len) => {
                for b in &mut window[i..i + len] {
                    *b = b'X';
                }
                report.record_match(len);
                i += len;
            }
            None => i += 1,
        }
    }
}

fn read_pdf_version(header: &[u8]) -> RedactResult<String> {
    const MAX_PREFIX: usize = 63;
    let prefix = &header[..header.len().min(MAX_PREFIX)];
    let needle = b"%PDF-";
    let Some(start) = prefix
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + needle.len())
    else {
        return Err(RedactError::NotAPdf);
    };
    let rest = &prefix[start..];
    if rest.len() < 3
        || !rest[0].is_ascii_digit()
        || rest[1] != b'.'
        || !rest[2].is_ascii_digit()
    {
        return Err(RedactError::NotAPdf);
    }
    Ok(format!("{}.{}", rest[0] as char, rest[2] as char))
}

/// Redacts `input` into `output` per `plan`, returning the completed report.
/// `output`'s permission bits match `input`'s; the output file is `fsync`ed
/// before it is closed.
pub fn redact_file(input: &Path, output: &Path, plan: &RedactionPlan) -> RedactResult<Report> {
    let mut infile = File::open(input)?;
    let perms = infile.metadata()?.permissions();

    let mut header = vec![0u8; 63];
    let read = infile.read(&mut header)?;
    header.truncate(read);
    let pdf_version = read_pdf_version(&header)?;
    infile.seek(SeekFrom::Start(0))?;

    let mut outfile = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(output)?;
    outfile.set_permissions(perms)?;

    let mut report = Report::new(pdf_version, plan.patterns.len());
    let overlap = overlap_len(plan);

    let mut carry: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; MIN_CHUNK_SIZE];
    loop {
        let n = infile.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        report.bytes_scanned += n as u64;

        let mut window = std::mem::take(&mut carry);
        window.extend_from_slice(&chunk[..n]);

        if window.len() <= overlap {
            carry = window;
            continue;
        }
        let scan_limit = window.len() - overlap;
        scan_and_redact(&mut window, scan_limit, &plan.patterns, &mut report);

        outfile.write_all(&window[..scan_limit])?;
        carry = window[scan_limit..].to_vec();
    }

    if !carry.is_empty() {
        let len = carry.len();
        scan_and_redact(&mut carry, len, &plan.patterns, &mut report);
        outfile.write_all(&carry)?;
    }

    outfile.flush()?;
    outfile.sync_all()?;
    tracing::debug!(
        input = %input.display(),
        pdf_version = %report.pdf_version,
        matches = report.match_count,
        bytes_redacted = report.bytes_redacted,
        "redaction complete"
    );
    Ok(report)
}
