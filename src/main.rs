//! Tutordesk - browser-based AI tutoring chat
//!
//! A Rust backend that serves the chat page and forwards student
//! questions to Google's generative-language API.

mod api;
mod config;
mod conversation;
mod inference;
mod persona;
mod session;

use api::{create_router, AppState};
use config::Config;
use inference::{GeminiClient, InferenceService, LoggingService};
use session::ChatSession;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutordesk=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration is read once at startup; a missing API key fails here
    // rather than on the first submission.
    let config = Config::from_env()?;

    let gemini = GeminiClient::new(config.api_key, config.model);
    let inference: Arc<dyn InferenceService> =
        Arc::new(LoggingService::new(Arc::new(gemini)));
    tracing::info!(model = %inference.model_id(), "Inference client initialized");

    let session = Arc::new(ChatSession::new(inference));
    let state = AppState::new(session);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Tutordesk listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
