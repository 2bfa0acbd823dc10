//! Library Service
//!
//! Serves the seeded author and book catalog over the library API

use library_api::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load_for_service("library-service")?;

    // Initialize tracing
    init_tracing(&config)?;

    tracing::info!(
        base_url = %config.hypermedia.base_url,
        "Starting library service"
    );

    // Seeded in-memory catalog plus the registries the handlers need
    let state = AppState::in_memory(config.clone())?;
    let app = router(state);

    // Run server
    Server::new(config).serve(app).await?;

    Ok(())
}
