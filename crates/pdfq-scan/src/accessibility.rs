// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The accessibility scanner (spec §4.4): a streaming token scanner that
//! recognizes a fixed set of PDF name/keyword tokens and reports which
//! accessibility features are present, plus a bounded list of
//! "missing-feature" issue codes for the ones that are not.
//!
//! This is an external-interface-level component (spec §1, §4.4): no real
//! PDF object parsing, just byte-token presence over the raw stream.

use serde::Serialize;

use crate::error::ScanResult;
use crate::tokenscan::{count_tokens, read_pdf_version};

pub const MAX_ISSUES: usize = 32;

const TOKENS: &[(&str, &[u8])] = &[
    ("has_mark_info", b"/MarkInfo"),
    ("is_marked", b"/Marked true"),
    ("has_struct_tree", b"/StructTreeRoot"),
    ("has_lang", b"/Lang"),
    ("has_alt_text", b"/Alt"),
    ("has_viewer_preferences", b"/ViewerPreferences"),
    ("has_display_doc_title", b"/DisplayDocTitle true"),
    ("has_tagged", b"/Tagged"),
];

fn issue_code(flag_name: &str) -> String {
    format!("MISSING_{}", flag_name.trim_start_matches("has_").trim_start_matches("is_").to_uppercase())
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AccessibilityReport {
    pub pdf_version: String,
    pub has_mark_info: bool,
    pub is_marked: bool,
    pub has_struct_tree: bool,
    pub has_lang: bool,
    pub has_alt_text: bool,
    pub has_viewer_preferences: bool,
    pub has_display_doc_title: bool,
    pub has_tagged: bool,
    pub issues: Vec<String>,
}

impl AccessibilityReport {
    /// Flat-ish JSON object (one nested array, `issues`), per spec §4.4.
    pub fn to_json(&self) -> ScanResult<String> {
        serde_json::to_string(self).map_err(|e| crate::error::ScanError::InvalidArgument(e.to_string()))
    }
}

/// Streams `path`, classifying it by the token set above. Returns `Ok` with
/// the populated report unless the file fails the version-prefix check.
pub fn scan_accessibility(path: &std::path::Path) -> ScanResult<AccessibilityReport> {
    let pdf_version = read_pdf_version(path)?;
    let token_bytes: Vec<&[u8]> = TOKENS.iter().map(|(_, t)| *t).collect();
    let counts = count_tokens(path, &token_bytes)?;

    let flags: Vec<bool> = counts.iter().map(|&c| c > 0).collect();
    let mut issues = Vec::new();
    for ((name, _), present) in TOKENS.iter().zip(flags.iter()) {
        if !present && issues.len() < MAX_ISSUES {
            issues.push(issue_code(name));
        }
    }

    tracing::debug!(path = %path.display(), issue_count = issues.len(), "accessibility scan complete");

    Ok(AccessibilityReport {
        pdf_version,
        has_mark_info: flags[0],
        is_marked: flags[1],
        has_struct_tree: flags[2],
        has_lang: flags[3],
        has_alt_text: flags[4],
        has_viewer_preferences: flags[5],
        has_display_doc_title: flags[6],
        has_tagged: flags[7],
        issues,
    })
}
