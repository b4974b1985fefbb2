// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process response types

use serde::{Deserialize, Serialize};

use crate::vision::AnalysisReport;

/// Fixed placeholder reported as processing_time; not a measurement
const PROCESSING_TIME_PLACEHOLDER: f64 = 0.5;

/// Response from POST /process
///
/// The analysis fields sit at the top level of the JSON body, alongside the
/// upload's original filename and the processing-time placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessResponse {
    #[serde(flatten)]
    pub analysis: AnalysisReport,
    pub processing_time: f64,
    pub filename: String,
}

impl ProcessResponse {
    pub fn new(analysis: AnalysisReport, filename: String) -> Self {
        Self {
            analysis,
            processing_time: PROCESSING_TIME_PLACEHOLDER,
            filename,
        }
    }
}
