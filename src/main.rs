// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use ai_image_processor::api::{start_server, SERVICE_NAME};
use anyhow::Result;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting {}...", SERVICE_NAME);
    println!("📦 {}", ai_image_processor::version::get_version_string());

    // Parse environment variables for configuration
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .unwrap_or_else(|_| "5002".to_string())
        .parse::<u16>()
        .unwrap_or(5002);

    println!("🌐 {} running on http://{}:{}", SERVICE_NAME, host, port);

    start_server(&host, port).await
}
