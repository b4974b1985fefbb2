// Version information for the AI Image Processor

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-image-analysis-2026-08-06";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-06";

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("AI Image Processor {} ({})", VERSION_NUMBER, BUILD_DATE)
}
