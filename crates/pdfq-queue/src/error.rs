// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors from queue operations (spec §7).

use pdfq_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueueError {
    pub fn http_status(&self) -> u16 {
        match self {
            QueueError::InvalidArgument(_) => 400,
            QueueError::NotFound(_) => 404,
            QueueError::Io(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            QueueError::InvalidArgument(_) => "invalid_argument",
            QueueError::NotFound(_) => "not_found",
            QueueError::Io(_) => "io",
        }
    }
}

impl From<CoreError> for QueueError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidArgument(m) => QueueError::InvalidArgument(m),
            CoreError::NotFound(m) => QueueError::NotFound(m),
            CoreError::Io(e) => QueueError::Io(e),
            CoreError::Parse(m) => QueueError::InvalidArgument(m),
            CoreError::BufferTooSmall { needed, have } => {
                QueueError::InvalidArgument(format!("buffer too small: need {needed}, have {have}"))
            }
        }
    }
}

pub type QueueResult<T> = Result<T, QueueError>;
