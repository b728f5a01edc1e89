// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server-local error taxonomy (spec §7), mapped directly onto HTTP status
//! codes by [`ServerError::http_status`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("request timed out")]
    Timeout,

    #[error("request too large")]
    TooLarge,

    #[error("too many header lines")]
    TooManyHeaders,

    #[error("content-length required")]
    LengthRequired,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("not found: no such route")]
    RouteNotFound,

    #[error("service unavailable")]
    Unavailable,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::InvalidArgument(_) | ServerError::Parse(_) => 400,
            ServerError::Unauthorized => 401,
            ServerError::Forbidden(_) => 403,
            ServerError::NotFound(_) => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::Timeout => 408,
            ServerError::LengthRequired => 411,
            ServerError::TooLarge => 413,
            ServerError::Io(_) => 500,
            ServerError::RouteNotFound => 404,
            ServerError::Unavailable => 503,
            ServerError::TooManyHeaders => 400,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self.status() {
            200 => "OK",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            411 => "Length Required",
            413 => "Payload Too Large",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Error",
        }
    }
}

impl From<pdfq_core::CoreError> for ServerError {
    fn from(e: pdfq_core::CoreError) -> Self {
        match e {
            pdfq_core::CoreError::InvalidArgument(m) => ServerError::InvalidArgument(m),
            pdfq_core::CoreError::NotFound(m) => ServerError::NotFound(m),
            pdfq_core::CoreError::Io(e) => ServerError::Io(e),
            pdfq_core::CoreError::Parse(m) => ServerError::Parse(m),
            pdfq_core::CoreError::BufferTooSmall { needed, have } => {
                ServerError::Io(std::io::Error::other(format!("buffer too small: need {needed}, have {have}")))
            }
        }
    }
}

impl From<pdfq_queue::QueueError> for ServerError {
    fn from(e: pdfq_queue::QueueError) -> Self {
        match e {
            pdfq_queue::QueueError::InvalidArgument(m) => ServerError::InvalidArgument(m),
            pdfq_queue::QueueError::NotFound(m) => ServerError::NotFound(m),
            pdfq_queue::QueueError::Io(e) => ServerError::Io(e),
        }
    }
}

impl From<pdfq_redact::RedactError> for ServerError {
    fn from(e: pdfq_redact::RedactError) -> Self {
        match e {
            pdfq_redact::RedactError::InvalidArgument(m) => ServerError::InvalidArgument(m),
            pdfq_redact::RedactError::Parse(m) => ServerError::Parse(m),
            pdfq_redact::RedactError::Io(e) => ServerError::Io(e),
            pdfq_redact::RedactError::NotAPdf => ServerError::InvalidArgument("not a PDF".into()),
        }
    }
}

impl From<pdfq_scan::ScanError> for ServerError {
    fn from(e: pdfq_scan::ScanError) -> Self {
        match e {
            pdfq_scan::ScanError::InvalidArgument(m) => ServerError::InvalidArgument(m),
            pdfq_scan::ScanError::Io(e) => ServerError::Io(e),
            pdfq_scan::ScanError::NotAPdf => ServerError::InvalidArgument("not a PDF".into()),
            pdfq_scan::ScanError::UnknownProvider(m) => ServerError::InvalidArgument(m),
            pdfq_scan::ScanError::BufferTooSmall { needed, have } => {
                ServerError::Io(std::io::Error::other(format!("buffer too small: need {needed}, have {have}")))
            }
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
