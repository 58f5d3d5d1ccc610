use std::sync::Arc;

use cinemind_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{generator::GeminiGenerator, providers::TmdbProvider, RecommendationPipeline},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let generator = GeminiGenerator::new(
        config.gemini_api_key.clone(),
        config.gemini_api_url.clone(),
        config.gemini_model.clone(),
    );
    let provider = TmdbProvider::new(config.tmdb_api_key.clone(), config.tmdb_api_url.clone());

    let pipeline = RecommendationPipeline::new(
        Arc::new(generator),
        Arc::new(provider),
        config.max_concurrent_lookups,
    );
    let app = create_router(Arc::new(AppState::new(pipeline)));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        model = %config.gemini_model,
        max_concurrent_lookups = config.max_concurrent_lookups,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
