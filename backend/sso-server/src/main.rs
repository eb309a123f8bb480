use sso_server::{AppState, GitHubClient, build_router, logger, prometheus};

use sso_config::Config;
use sso_db::Database;

use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional (development)
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(parent) = log_file_path.as_ref().and_then(|p| p.parent()) {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting sso-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Opening database: {}", database_path.display());
    let pool = Database::open(&database_path).await?;
    info!("Database ready");

    let prometheus = prometheus::install_recorder()?;

    let provider = config.provider.provider();
    info!(
        "{} Callback URL: {}{}",
        provider.log_tag(),
        config.site.base_url(),
        provider.callback_path()
    );

    let oauth = Arc::new(GitHubClient::new(&provider)?);
    let state =
        AppState::new(pool, provider, config.site.clone(), oauth).with_prometheus(prometheus);

    let app = build_router(state).layer(ConcurrencyLimitLayer::new(config.server.max_connections));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => {
                    error!("Failed to listen for SIGINT: {}", e);
                    std::future::pending::<()>().await
                }
            }
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}
