use ingest_service::config::IngestConfig;
use ingest_service::startup::Application;
use service_core::error::AppError;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = IngestConfig::load()?;

    init_tracing(
        "ingest-service",
        &config.logging.level,
        config.logging.otlp_endpoint.as_deref(),
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = ?config.store.backend,
        "Starting ingest service"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}
