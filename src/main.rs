use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use translator_tts::config::Config;
use translator_tts::server::{create_router, AppState};
use translator_tts::speech::GoogleSpeechSynthesizer;
use translator_tts::storage::AudioStore;
use translator_tts::translation::GoogleTranslator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translator_tts=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    // Provider clients are built once and shared by every request
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let translator = GoogleTranslator::new(
        http.clone(),
        &config.translate_api_url,
        config.google_api_key.clone(),
    );
    let synthesizer =
        GoogleSpeechSynthesizer::new(http, &config.tts_api_url, config.google_api_key.clone());

    let audio_store = AudioStore::new(&config.static_dir, "/static");
    audio_store
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create {}", config.static_dir.display()))?;

    let state = AppState::new(
        Arc::new(translator),
        Arc::new(synthesizer),
        Arc::new(audio_store),
    );
    let app = create_router(state, &config.index_file);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server started at http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
