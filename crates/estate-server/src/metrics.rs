//! Prometheus metrics export.

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use estate_config::ObservabilityConfig;
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tracing::{error, info};

/// Handle to the installed Prometheus recorder.
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Renders every metric in the Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the global Prometheus recorder.
///
/// Returns `None` when metrics are disabled or a recorder is already set.
pub fn init_metrics(config: &ObservabilityConfig) -> Option<PrometheusMetrics> {
    if !config.metrics_enabled {
        info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("estate_build_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            info!(path = %config.metrics_path, "Prometheus metrics initialized");
            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Creates the scrape router mounted at `path`.
pub fn metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}
