// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process endpoint handler

use axum::Json;
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};

use super::response::ProcessResponse;
use crate::api::errors::ApiError;
use crate::vision::{analyze, decode_image_bytes, format_to_extension};

struct UploadedImage {
    filename: String,
    data: axum::body::Bytes,
}

/// POST /process - Analyze an uploaded image
///
/// Accepts a multipart form with a file field named `image` and returns the
/// analysis result with the original filename attached.
///
/// # Errors
/// - 400 Bad Request: no `image` field, or the field carries no filename
/// - 500 Internal Server Error: unreadable multipart body or undecodable
///   image bytes
///
/// A decoded image always yields 200, even when the analyzer itself fails;
/// that failure is reported inside the body.
pub async fn process_handler(multipart: Multipart) -> Result<Json<ProcessResponse>, ApiError> {
    let upload = read_image_field(multipart).await?;

    let (image, image_info) = decode_image_bytes(&upload.data).map_err(|e| {
        warn!("Failed to decode upload '{}': {}", upload.filename, e);
        ApiError::ProcessingFailed(e.to_string())
    })?;

    debug!(
        "Decoded {} image: {}x{}, {} bytes",
        format_to_extension(image_info.format),
        image_info.width,
        image_info.height,
        image_info.size_bytes
    );

    let report = analyze(&image);

    match report.error {
        None => info!(
            "Analyzed '{}': {} ({:.2})",
            upload.filename, report.classification, report.confidence
        ),
        Some(ref e) => warn!("Analysis failed for '{}': {}", upload.filename, e),
    }

    Ok(Json(ProcessResponse::new(report, upload.filename)))
}

/// Walk the multipart fields looking for one named `image`
async fn read_image_field(mut multipart: Multipart) -> Result<UploadedImage, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::ProcessingFailed(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
            .ok_or(ApiError::NoFileSelected)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::ProcessingFailed(e.to_string()))?;

        return Ok(UploadedImage { filename, data });
    }

    warn!("Upload rejected: no image field in form");
    Err(ApiError::MissingImage)
}
