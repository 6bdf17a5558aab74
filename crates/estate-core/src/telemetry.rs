//! Logging initialization.
//!
//! Sets up a `tracing` subscriber with an `EnvFilter`. `RUST_LOG` overrides
//! the configured level when present.

use serde::{Deserialize, Serialize};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, multi-field output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Builds the default filter directive for a base level.
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!("{level},estate=debug,tower_http=debug,sqlx=warn")
}

/// Initialize the global tracing subscriber.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
#[cfg(feature = "telemetry")]
pub fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    };

    if result.is_ok() {
        tracing::info!(level, ?format, "Logging initialized");
    }
}

/// Placeholder for when the telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_logging(_level: &str, _format: LogFormat) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive("info"),
            "info,estate=debug,tower_http=debug,sqlx=warn"
        );
    }

    #[test]
    fn test_log_format_deserializes_lowercase() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }
}
