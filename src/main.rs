//! isotherm - temperature frame and atlas server
//!
//! This is the main entry point for the isotherm HTTP server.

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use isotherm::data_loader::load_grid_file;
use isotherm::handlers::{build_router, heartbeat::mark_start};
use isotherm::{init_tracing, AppState, Config, IsothermError, Result};

fn main() -> Result<()> {
    // Load configuration
    let (config, grid_path, num_days) = match Config::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            init_tracing("info");
            error!("Configuration error: {}", e);
            return Err(e);
        }
    };

    init_tracing(&config.log_level);
    info!("Starting isotherm v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.server.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(serve(config, grid_path, num_days))
}

async fn serve(
    config: Config,
    grid_path: std::path::PathBuf,
    num_days: Option<usize>,
) -> Result<()> {
    mark_start();
    info!("Loading grid file: {:?}", grid_path);

    let grid = load_grid_file(&grid_path, num_days).map_err(|e| {
        error!("Failed to load grid file: {}", e);
        e
    })?;

    info!("Serving {} day(s)", grid.num_days());

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| IsothermError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let state = AppState::new_shared(config, grid, grid_path);
    let app = build_router(state.clone());

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| IsothermError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server is ready to accept connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| IsothermError::Server {
            message: format!("Server error: {}", e),
        })?;

    // Stop any running job at its next day boundary
    if state.worker.status().is_running() && state.worker.cancel() {
        info!("Cancelled running atlas job");
    }

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
