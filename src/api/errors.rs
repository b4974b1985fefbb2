// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire shape of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Failures surfaced as HTTP error responses
///
/// Analysis failures are deliberately absent: once an upload decodes, the
/// analyzer reports its own failures inside a 200 body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    MissingImage,
    NoFileSelected,
    ProcessingFailed(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::NoFileSelected => StatusCode::BAD_REQUEST,
            ApiError::ProcessingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MissingImage => "No image file provided".to_string(),
            ApiError::NoFileSelected => "No file selected".to_string(),
            ApiError::ProcessingFailed(msg) => format!("Processing failed: {}", msg),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
