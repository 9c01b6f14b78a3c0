//! surfsup - A small read-only HTTP API over a SQLite climate dataset
//!
//! This is the main entry point for the surfsup application.

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use surfsup::handlers::heartbeat;
use surfsup::{
    create_router, init_tracing, log_dataset_stats, AppState, Config, Result, SurfsUpError,
};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    init_tracing(&config.log_level);

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.server.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.enable_all().build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting surfsup v{}", env!("CARGO_PKG_VERSION"));
    heartbeat::mark_start();

    info!("Opening dataset: {:?}", config.data.database_path);

    // Open the dataset and create application state
    let state = AppState::initialize_shared(config.clone())
        .await
        .map_err(|e| {
            error!("Failed to open dataset: {}", e);
            e
        })?;

    log_dataset_stats(
        &config.data.database_path.display().to_string(),
        &state.summary,
    );

    let app = create_router(state.clone());

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SurfsUpError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server is ready to accept connections");

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Server error: {}", e),
        })?;

    state.store.close().await;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
