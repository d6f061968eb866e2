//! DrugNER Server
//!
//! Web front end for drug label entity recognition. Accepts free text,
//! runs it through the configured NER model, and renders the text with the
//! recognized spans highlighted.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod render;

use config::ServerConfig;
use drugner_model::LazyModel;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Initialize tracing from `RUST_LOG`, defaulting to `info`
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build application state from configuration
///
/// The model is not loaded here; it loads on the first request that needs it.
pub fn build_state(config: &ServerConfig) -> AppState {
    let extractor = LazyModel::lexicon(config.model.name.clone(), config.model.path.clone());

    AppState {
        extractor: Arc::new(extractor),
        model_name: Arc::from(config.model.name.as_str()),
        placeholder_text: Arc::from(config.placeholder_text.as_str()),
        max_text_length: config.max_text_length,
    }
}

/// Start the HTTP server
///
/// Validates configuration, builds the application state and serves the
/// axum router until the process exits.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing();
    config.validate()?;

    info!("Starting DrugNER server");
    info!("Bind address: {}", config.bind_addr());
    info!(
        "Model: '{}' at {}",
        config.model.name,
        config.model.path.display()
    );
    info!("Max text length: {} chars", config.max_text_length);

    let app = create_router(build_state(&config));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
