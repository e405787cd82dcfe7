//! Conversa Server Binary
//!
//! Standalone backend relaying user messages to the completion API while
//! maintaining per-session incremental context.

use std::sync::Arc;

use conversa_core::AppConfig;
use conversa_server::{keepalive, serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    if config.completion.api_key.is_empty() {
        tracing::warn!("ZAI_API_KEY is not set; completion calls will be rejected upstream");
    }

    let state = Arc::new(AppState::new(&config)?);

    let ping_task = match config.keepalive_url.clone() {
        Some(url) => Some(tokio::spawn(keepalive::run(url))),
        None => {
            tracing::warn!("keep-alive URL not set, ping disabled");
            None
        }
    };

    serve(&config.bind_addr, state, &config.allowed_origins).await?;

    if let Some(task) = ping_task {
        task.abort();
        tracing::info!("keep-alive task cancelled");
    }

    Ok(())
}
