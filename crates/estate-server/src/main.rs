//! # Estate Server
//!
//! Main entry point for the estate listings service.

use anyhow::Context;
use estate_config::ConfigLoader;
use estate_core::telemetry::init_logging;
use estate_server::{app::build_app, metrics::init_metrics, startup::print_startup_info};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {:#}", e);
        eprintln!("Application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config_loader =
        ConfigLoader::from_default_location().context("failed to load configuration")?;
    let config = config_loader.get().await;

    init_logging(&config.observability.log_level, config.observability.log_format);

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let metrics = init_metrics(&config.observability);
    let router = build_app(&config, metrics)
        .await
        .context("failed to build application")?;

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("REST server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
