//! Disease Prediction Server
//!
//! HTTP backend for the disease prediction forms.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  DISEASE PREDICTION SERVER                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────────┐  ┌─────────────────────┐  │
//! │  │  API      │  │  Validator    │  │  Dispatcher         │  │
//! │  │  (Axum)   │─►│  (batched)    │─►│  (model registry)   │  │
//! │  └───────────┘  └───────────────┘  └──────────┬──────────┘  │
//! │                                               ▼             │
//! │                                      ┌─────────────────┐    │
//! │                                      │ saved_models/*  │    │
//! │                                      └─────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use disease_predict_core::Pipeline;
use tokio::sync::Notify;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use config::{Config, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Disease Prediction Server starting...");

    // Load every classifier before serving anything
    let registry_config = config.registry_config().context("Failed to read model configuration")?;
    tracing::info!("Models: {}", registry_config.models_dir.display());

    let pipeline = Pipeline::from_config(&registry_config).context("Failed to load model registry")?;

    // Build application state
    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: config.clone(),
        shutdown: Arc::new(Notify::new()),
    };
    let shutdown = Arc::clone(&state.shutdown);

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let default_filter = if config.is_production() {
        "disease_predict_server=info,disease_predict_core=info,tower_http=info"
    } else {
        "disease_predict_server=debug,disease_predict_core=info,tower_http=debug"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Resolves on Ctrl+C or when a handler reports a broken registry
async fn shutdown_signal(fatal: Arc<Notify>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("Ctrl+C received, shutting down"),
        _ = fatal.notified() => tracing::error!("Fatal model error, shutting down"),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub config: Config,
    /// Signalled when the process must stop serving
    pub shutdown: Arc<Notify>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/forms", get(handlers::forms::list))
        .route("/api/v1/forms/:disease", get(handlers::forms::get))
        .route("/api/v1/forms/:disease/predict", post(handlers::predict::predict))
        .route("/api/v1/models", get(handlers::models::status));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
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
