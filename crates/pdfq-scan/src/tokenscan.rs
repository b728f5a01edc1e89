// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared streaming byte-token scanner used by both the accessibility and
//! OCR scanners (spec §4.4). Neither scanner parses real PDF objects (spec
//! §1 Non-goals); both just count byte-string tokens in the raw stream,
//! carrying a small overlap buffer across chunk boundaries the same way
//! `pdfq_redact::engine` does for its literal/PII matches.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ScanError, ScanResult};

pub const CHUNK_SIZE: usize = 32 * 1024;
const MAX_VERSION_PREFIX: usize = 63;

/// Reads the first bytes of `path` and extracts the `%PDF-<d>.<d>` version
/// string from within the first 63 bytes (spec §4.3's version check, reused
/// here since both scanners report `pdf_version`).
pub fn read_pdf_version(path: &Path) -> ScanResult<String> {
    let mut file = File::open(path)?;
    let mut header = vec![0u8; MAX_VERSION_PREFIX];
    let read = file.read(&mut header)?;
    header.truncate(read);

    let needle = b"%PDF-";
    let Some(start) = header
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + needle.len())
    else {
        return Err(ScanError::NotAPdf);
    };
    let rest = &header[start..];
    if rest.len() < 3 || !rest[0].is_ascii_digit() || rest[1] != b'.' || !rest[2].is_ascii_digit() {
        return Err(ScanError::NotAPdf);
    }
    Ok(format!("{}.{}", rest[0] as char, rest[2] as char))
}

/// Streams `path` in fixed-size chunks, counting (possibly overlapping, but
/// not double-counted at boundaries) occurrences of each byte string in
/// `tokens`. Returns one count per token, in the same order as `tokens`.
pub fn count_tokens(path: &Path, tokens: &[&[u8]]) -> ScanResult<Vec<u64>> {
    let longest = tokens.iter().map(|t| t.len()).max().unwrap_or(1);
    let overlap = longest.saturating_sub(1);

    let mut counts = vec![0u64; tokens.len()];
    let mut file = File::open(path)?;
    let mut carry: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        let mut window = std::mem::take(&mut carry);
        window.extend_from_slice(&chunk[..n]);

        if window.len() <= overlap {
            carry = window;
            continue;
        }
        let scan_limit = window.len() - overlap;
        scan_window(&window, scan_limit, tokens, &mut counts);
        carry = window[scan_limit..].to_vec();
    }
    if !carry.is_empty() {
        let len = carry.len();
        scan_window(&carry, len, tokens, &mut counts);
    }
    Ok(counts)
}

fn scan_window(window: &[u8], scan_limit: usize, tokens: &[&[u8]], counts: &mut [u64]) {
    let mut i = 0usize;
    while i < scan_limit {
        let mut advanced = false;
        for (idx, token) in tokens.iter().enumerate() {
            if !token.is_empty() && window[i..].len() >= token.len() && &window[i..i + token.len()] == *token {
                counts[idx] += 1;
                i += token.len();
                advanced = true;
                break;
            }
        }
        if !advanced {
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn counts_non_overlapping_hits() {
        let mut f = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, b"%PDF-1.6\nfoo bar foo baz foo").unwrap();
        let counts = count_tokens(f.path(), &[b"foo"]).unwrap();
        assert_eq!(counts, vec![3]);
    }

    #[test]
    fn finds_token_straddling_chunk_boundary() {
        let mut body = b"%PDF-1.7\n".to_vec();
        body.extend(std::iter::repeat(b'a').take(CHUNK_SIZE - 5));
        body.extend_from_slice(b"MARKER");
        let mut f = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, &body).unwrap();
        let counts = count_tokens(f.path(), &[b"MARKER"]).unwrap();
        assert_eq!(counts, vec![1]);
    }

    #[test]
    fn version_prefix_rejects_non_pdf() {
        let mut f = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, b"not a pdf").unwrap();
        assert!(matches!(read_pdf_version(f.path()), Err(ScanError::NotAPdf)));
    }
}
