// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by every crate in the workspace.
//!
//! Mirrors the five error kinds the queue/redaction/scan/server layers all
//! need to map onto HTTP status codes and worker exit codes: an invalid
//! caller input, a missing file, an underlying I/O failure, a malformed
//! input document, and a serialisation buffer that needs to grow.

use thiserror::Error;

/// Core error kind, reused (via `#[from]`) by every downstream crate's own
/// error enum so that HTTP status mapping and worker exit codes stay
/// consistent across the queue, redaction, scan, and server layers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("buffer too small: need at least {needed} bytes, have {have}")]
    BufferTooSmall { needed: usize, have: usize },
}

impl CoreError {
    /// HTTP status code this error kind maps to (spec.md §7).
    pub fn http_status(&self) -> u16 {
        match self {
            CoreError::InvalidArgument(_) => 400,
            CoreError::NotFound(_) => 404,
            CoreError::Io(_) => 500,
            CoreError::Parse(_) => 400,
            CoreError::BufferTooSmall { .. } => 500,
        }
    }

    /// Short machine-readable kind string, used in worker error-metadata JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::InvalidArgument(_) => "invalid_argument",
            CoreError::NotFound(_) => "not_found",
            CoreError::Io(_) => "io",
            CoreError::Parse(_) => "parse",
            CoreError::BufferTooSmall { .. } => "buffer_too_small",
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
