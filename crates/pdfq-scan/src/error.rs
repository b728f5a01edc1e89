// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use pdfq_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a PDF: missing version header in first 63 bytes")]
    NotAPdf,
    #[error("unknown OCR provider: {0}")]
    UnknownProvider(String),
    #[error("buffer too small: need at least {needed} bytes, have {have}")]
    BufferTooSmall { needed: usize, have: usize },
}

impl ScanError {
    pub fn http_status(&self) -> u16 {
        match self {
            ScanError::InvalidArgument(_) | ScanError::NotAPdf | ScanError::UnknownProvider(_) => 400,
            ScanError::Io(_) | ScanError::BufferTooSmall { .. } => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::InvalidArgument(_) => "invalid_argument",
            ScanError::Io(_) => "io",
            ScanError::NotAPdf => "parse",
            ScanError::UnknownProvider(_) => "invalid_argument",
            ScanError::BufferTooSmall { .. } => "buffer_too_small",
        }
    }
}

impl From<CoreError> for ScanError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidArgument(s) => ScanError::InvalidArgument(s),
            CoreError::Io(e) => ScanError::Io(e),
            CoreError::BufferTooSmall { needed, have } => ScanError::BufferTooSmall { needed, have },
            other => ScanError::InvalidArgument(other.to_string()),
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
