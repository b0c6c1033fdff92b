//! Diabetes Prediction API Server
//!
//! Loads a pre-trained classifier once at startup and serves predictions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  POST /predict   ┌──────────────────────────────┐
//! │   client /   │ ───────────────▶ │   API (Axum)                 │
//! │   smoke      │ ◀─────────────── │     AppJson<DiabetesInput>   │
//! └──────────────┘  {"prediction"}  │            │                 │
//!                                   │            ▼                 │
//!                                   │   Arc<dyn Classifier>        │
//!                                   │   (loaded from MODEL_PATH)   │
//!                                   └──────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod inference;
mod models;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use inference::Classifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "diabetes_api=debug,tower_http=debug".into()))
        .with(config.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Diabetes prediction API starting...");
    tracing::info!(
        "Environment: {}, model: {}, custom secret: {}",
        config.environment, config.model_path, config.has_custom_secret()
    );
    if let Some(host) = &config.unresolved_host {
        tracing::warn!("Cannot resolve HOST={:?}, binding to {} instead", host, config.host);
    }
    if config.is_production() && !config.has_custom_secret() {
        tracing::warn!("API_SECRET not set in production, using the default value");
    }

    // Load the model once; it stays read-only for the process lifetime
    let model = inference::load_model(&config.model_path)
        .with_context(|| format!("Failed to load model from {}", config.model_path))?;

    // Build application state
    let state = AppState {
        model,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Classifier>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::welcome))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
