use axum_helpers::server::create_production_app;
use core_config::load_dotenv;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_rag::{
    OpenAICompletionProvider, OpenAIEmbeddingProvider, QdrantRepository, RagService,
};
use eyre::WrapErr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let dotenv_loaded = load_dotenv();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    info!(
        url = %config.qdrant.url,
        collection = %config.qdrant.collection,
        "Connecting to Qdrant"
    );
    let repository = QdrantRepository::connect(config.qdrant.clone())
        .await
        .wrap_err("Vector store is not reachable")?;

    let embedder = OpenAIEmbeddingProvider::new(config.openai.clone())?;
    let completer = OpenAICompletionProvider::new(config.openai.clone())?;
    info!(
        embedding_model = %config.openai.embedding_model,
        chat_model = %config.openai.chat_model,
        "OpenAI providers configured"
    );

    let service = Arc::new(RagService::new(
        Arc::new(repository),
        Arc::new(embedder),
        Arc::new(completer),
        config.rag.clone(),
    ));

    let api_routes = api::routes(service, config.app);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &config.server)?;

    info!("Starting RAG API with graceful shutdown (30s timeout)");

    create_production_app(router, &config.server, Duration::from_secs(30), async {
        // Gateway clients hold no state that needs flushing
        info!("Shutting down: releasing gateway clients");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("RAG API shutdown complete");
    Ok(())
}
