use graphworks_datasource::server;
use graphworks_datasource::{ConnectionSettings, ServerConfig, WorksDataSource};
use tracing::{info, warn};
use tracing_subscriber::{filter::EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("graphworks_datasource=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    if let Err(e) = dotenv {
        warn!("No .env loaded: {}", e);
    }

    info!("Starting GraphWorks data source");

    let settings = ConnectionSettings::from_env()?;
    let server_config = ServerConfig::from_env()?;
    info!(
        "Using GraphWorks backend at {} (data source '{}', uid {})",
        settings.url, settings.name, settings.uid
    );

    let state = server::AppState::new(WorksDataSource::new(settings));
    let app = server::create_router(state);

    info!("Server starting on {}", server_config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", server_config.bind_addr, e))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;
    info!("Server stopped");

    Ok(())
}
