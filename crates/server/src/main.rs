use anyhow::Context;
use server::ai::GeminiClient;
use server::config::ServerConfig;
use server::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("server=info,objstudio_mesh=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set, non-template descriptions will get the fallback model");
    }
    tracing::info!("Config: {}", serde_json::to_string(&config)?);

    let bind = config.bind.clone();
    let generator = GeminiClient::from_config(&config);
    let state = AppState::new(config, generator);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!("Server running on http://{}", bind);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
