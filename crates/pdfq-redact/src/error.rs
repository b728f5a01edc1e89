// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use pdfq_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedactError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("plan parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a PDF: missing version header in first 63 bytes")]
    NotAPdf,
}

impl RedactError {
    pub fn http_status(&self) -> u16 {
        match self {
            RedactError::InvalidArgument(_) | RedactError::Parse(_) | RedactError::NotAPdf => 400,
            RedactError::Io(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RedactError::InvalidArgument(_) => "invalid_argument",
            RedactError::Parse(_) => "parse",
            RedactError::Io(_) => "io",
            RedactError::NotAPdf => "invalid_argument",
        }
    }
}

impl From<CoreError> for RedactError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidArgument(s) => RedactError::InvalidArgument(s),
            CoreError::Parse(s) => RedactError::Parse(s),
            CoreError::Io(e) => RedactError::Io(e),
            other => RedactError::InvalidArgument(other.to_string()),
        }
    }
}

pub type RedactResult<T> = Result<T, RedactError>;
