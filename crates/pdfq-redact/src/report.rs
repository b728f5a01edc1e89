// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The redaction report (spec §4.3.2): pdf version, pattern count, match
//! count, bytes redacted, bytes scanned. Built incrementally into a `String`
//! buffer rather than one `format!` call, in the same spirit as the
//! bounded-retry report assembly used by the accessibility/OCR scanners in
//! `pdfq-scan` — there is no fixed-size buffer to retry against in Rust, but
//! keeping the same shape of construction keeps the three report types
//! textually consistent.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Report {
    pub pdf_version: String,
    pub pattern_count: usize,
    pub match_count: u64,
    pub bytes_redacted: u64,
    pub bytes_scanned: u64,
}

impl Report {
    pub fn new(pdf_version: String, pattern_count: usize) -> Self {
        Report {
            pdf_version,
            pattern_count,
            match_count: 0,
            bytes_redacted: 0,
            bytes_scanned: 0,
        }
    }

    pub fn record_match(&mut self, len: usize) {
        self.match_count += 1;
        self.bytes_redacted += len as u64;
    }

    /// Flat JSON object, no nested structures.
    pub fn to_json(&self) -> String {
        let mut out = String::with_capacity(128);
        out.push('{');
        out.push_str("\"pdf_version\":\"");
        for c in self.pdf_version.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push_str("\",");
        out.push_str(&format!("\"pattern_count\":{},", self.pattern_count));
        out.push_str(&format!("\"match_count\":{},", self.match_count));
        out.push_str(&format!("\"bytes_redacted\":{},", self.bytes_redacted));
        out.push_str(&format!("\"bytes_scanned\":{}", self.bytes_scanned));
        out.push('}');
        out
    }
}
