use anyhow::Context;
use seizureguard::api::{self, app_state::AppState};
use seizureguard::config::loader::ConfigLoader;
use seizureguard::ml::ModelArtifacts;
use seizureguard::observability::{
    ObservabilityState, create_observability_router, init_tracing,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging);

    info!("Starting SeizureGuard ({})...", config.environment);
    ConfigLoader::validate(&config).context("invalid configuration")?;
    info!("Configuration loaded successfully");

    let artifacts = match ModelArtifacts::load(&config.model) {
        Ok(artifacts) => {
            info!(
                "Model loaded from {} ({} features)",
                config.model.model_dir.display(),
                artifacts.feature_columns.len()
            );
            Some(artifacts)
        }
        Err(e) => {
            warn!("Model not loaded, predictions are disabled: {}", e);
            None
        }
    };

    let app_state =
        AppState::from_config(&config, artifacts).context("failed to initialize services")?;
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(
        app_state.metrics.clone(),
        app_state.version.clone(),
    ));
    let api_router = api::initialize_api(app_state).await?;
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
