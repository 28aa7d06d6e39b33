use std::process::ExitCode;
use std::sync::Arc;

use edugen::config::{ConfigError, ServerConfig};
use edugen::llm::LlmClient;
use edugen::llm::config::LlmConfig;
use edugen::llm::types::LlmError;
use edugen::routes;
use edugen::services::generation::GenerationClient;
use edugen::services::session;
use edugen::state::AppState;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "edugen: startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    // A missing provider credential is fatal: nothing can be generated without it.
    let llm_config = LlmConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    let llm = LlmClient::from_config(&llm_config)?;
    tracing::info!(base_url = %llm.base_url(), text_model = %llm_config.models.text, image_model = %llm_config.models.image, "llm: configured");
    let generator = Arc::new(GenerationClient::new(Arc::new(llm), llm_config.models.clone()));
    let state = AppState::new(generator);
    let _sweeper = session::spawn_session_sweeper(
        state.clone(),
        server_config.session_idle_timeout,
        server_config.session_sweep_interval,
    );

    let app = routes::app(state, server_config.static_dir.as_deref());
    let port = server_config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "edugen listening");
    axum::serve(listener, app).await?;
    Ok(())
}
