//! Server startup utilities.

use estate_config::AppConfig;
use tracing::info;

/// Logs where the server can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let addr = config.server.addr();
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1/properties", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    info!("{}", separator);
}
