//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FsBookStore, GeminiTextAdapter},
    config::Config,
    error::ApiError,
    web::{router, state::AppState},
};
use std::sync::Arc;
use storybook_core::{BookService, SystemClock};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    // A missing or malformed GEMINI_API_KEY stops the process here.
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Book Store ---
    let store = Arc::new(FsBookStore::open(&config.books_dir).await?);
    info!("Storing books in {}", store.dir().display());

    // --- 3. Initialize the Text Generation Adapter ---
    let client = GeminiTextAdapter::client(&config.gemini_api_base, &config.gemini_api_key);
    let llm = Arc::new(GeminiTextAdapter::new(client, config.gemini_model.clone()));
    info!("Using model {} at {}", config.gemini_model, config.gemini_api_base);

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        books: BookService::new(llm, store, Arc::new(SystemClock)),
    });

    // --- 5. Start the Server ---
    let app = router(app_state);
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
