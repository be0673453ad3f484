//! Basket Server
//!
//! HTTP front door for the shopping item analyzer: text analysis, shopping
//! list persistence and the static front-end.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod store;

use basket_domain::CompletionProvider;
use basket_extractor::ShoppingItemAnalyzer;
use config::ServerConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use store::JsonlListStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Server configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Completion provider configuration error
    #[error("Provider configuration error: {0}")]
    Provider(#[from] basket_llm::ConfigError),

    /// Completion provider could not be built
    #[error("Provider error: {0}")]
    Llm(#[from] basket_llm::LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Opens the JSONL list store, builds the router around `analyzer` and
/// serves until the process stops.
pub async fn start_server<L>(
    config: ServerConfig,
    analyzer: ShoppingItemAnalyzer<L>,
) -> Result<(), ServerError>
where
    L: CompletionProvider + 'static,
{
    info!("Starting Basket server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", analyzer.model_name());
    info!("List store: {}", config.list_store_path.display());

    if !config.static_dir.is_dir() {
        warn!(
            static_dir = %config.static_dir.display(),
            "Static directory not found, front-end routes will return 404"
        );
    }

    let state = AppState {
        analyzer: Arc::new(analyzer),
        store: Arc::new(JsonlListStore::new(config.list_store_path.clone())),
        static_dir: Arc::new(config.static_dir.clone()),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
