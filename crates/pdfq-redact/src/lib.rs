// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pdfq-redact: the streaming chunked PDF redaction engine (spec §4.3).
//!
//! Applies literal and PII-pattern redactions across chunk boundaries
//! without loading the input file into memory.

pub mod engine;
pub mod error;
pub mod pii;
pub mod plan;
pub mod report;

pub use engine::{redact_file, MIN_CHUNK_SIZE};
pub use error::{RedactError, RedactResult};
pub use plan::{parse_plan, RedactionPlan, MAX_PATTERNS, MAX_PATTERN_LEN};
pub use report::Report;
