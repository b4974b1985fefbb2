// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision module: upload decoding and pixel-statistics analysis
//!
//! This module provides:
//! - Byte-level image decoding with magic-byte format detection
//! - The feature analyzer (brightness, contrast, classification, objects)
//!
//! Everything here is CPU-only single-pass arithmetic.

pub mod analyzer;
pub mod image_utils;

pub use analyzer::{analyze, AnalysisReport, Classification, DetectedObject, ImageStats};
pub use image_utils::{
    decode_image_bytes, detect_format, format_to_extension, ImageError, ImageInfo,
};
