//! Conversa Server - HTTP surface for the chat relay
//!
//! Thin axum wrapper over `conversa-core`: five routes, a CORS allow-list,
//! and request tracing. All conversational failures come back as ordinary
//! 200 responses carrying an error-describing payload.

pub mod http;
pub mod keepalive;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use conversa_core::completion::{CompletionClient, CompletionService};
use conversa_core::{AppConfig, ChatRelay, Store};

/// Shared application state
pub struct AppState {
    pub relay: ChatRelay,
}

impl AppState {
    /// Create state backed by the real completion client
    pub fn new(config: &AppConfig) -> conversa_core::Result<Self> {
        let store = Store::new(&config.db_path)?;
        let completion = Arc::new(CompletionClient::new(&config.completion));
        Ok(Self::with_completion(store, completion))
    }

    /// Create state with an explicit completion service (tests use stubs)
    pub fn with_completion(store: Store, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            relay: ChatRelay::new(store, completion),
        }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(http::home))
        .route("/mensagem", post(http::post_message))
        .route("/contexto/{session_id}", get(http::get_context))
        .route("/prompt/atualizar", post(http::update_prompt))
        .route("/prompt/atual", get(http::current_prompt))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS allow-list with credentials.
///
/// Methods and headers are mirrored rather than wildcarded because
/// tower-http rejects `Any` alongside `allow_credentials(true)`.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Start the server; returns when the shutdown signal fires
pub async fn serve(
    addr: &str,
    state: Arc<AppState>,
    allowed_origins: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state, allowed_origins);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("conversa server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
