//! Application configuration structures.

use estate_core::telemetry::LogFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Listing store selection.
    #[serde(default)]
    pub store: StoreConfig,

    /// Database configuration (used by the MySQL store).
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Lookaside cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// HTTP API defaults.
    #[serde(default)]
    pub api: ApiConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "estate-listings".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// REST server host.
    pub host: String,
    /// REST server port.
    pub port: u16,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the REST server address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Which store adapter backs the repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store, optionally seeded with demo data.
    #[default]
    Memory,
    /// MySQL through `sqlx`.
    Mysql,
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store adapter.
    pub backend: StoreBackend,
    /// Fill an empty store with deterministic demo listings at startup.
    pub seed_demo_data: bool,
    /// Number of demo properties to generate.
    pub seed_property_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            seed_demo_data: true,
            seed_property_count: 50,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL.
    pub url: String,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds.
    pub idle_timeout_secs: u64,
    /// Run embedded migrations at startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 2,
            max_connections: 20,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Lookaside cache backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    /// In-process map shared by all requests.
    #[default]
    Memory,
    /// Redis, shared across instances.
    Redis,
    /// Every lookup is a miss and nothing is stored.
    Disabled,
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache backend.
    pub backend: CacheBackendKind,
    /// TTL for owners, images and traces, in seconds.
    pub entity_ttl_secs: u64,
    /// TTL for composed page results, in seconds.
    pub query_ttl_secs: u64,
    /// Redis URL, required when `backend = "redis"`.
    pub redis_url: Option<String>,
    /// Redis connection pool size.
    pub redis_pool_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            entity_ttl_secs: 1800, // 30 minutes
            query_ttl_secs: 300,   // 5 minutes
            redis_url: None,
            redis_pool_size: 10,
        }
    }
}

impl CacheConfig {
    /// Returns the entity TTL as a Duration.
    #[must_use]
    pub const fn entity_ttl(&self) -> Duration {
        Duration::from_secs(self.entity_ttl_secs)
    }

    /// Returns the query TTL as a Duration.
    #[must_use]
    pub const fn query_ttl(&self) -> Duration {
        Duration::from_secs(self.query_ttl_secs)
    }
}

/// HTTP API defaults for paging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Page used when the request has none or a non-positive one.
    pub default_page: u32,
    /// Page size used when the request has none or a non-positive one.
    pub default_page_size: u32,
    /// Upper bound for the page size.
    pub max_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: LogFormat,
    /// Enable metrics.
    pub metrics_enabled: bool,
    /// Metrics endpoint path.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.cache.backend, CacheBackendKind::Memory);
        assert_eq!(config.cache.entity_ttl(), Duration::from_secs(1800));
        assert_eq!(config.cache.query_ttl(), Duration::from_secs(300));
        assert_eq!(config.api.default_page, 1);
        assert_eq!(config.api.default_page_size, 20);
        assert_eq!(config.api.max_page_size, 100);
    }

    #[test]
    fn test_server_address() {
        assert_eq!(ServerConfig::default().addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"cache": {"backend": "redis", "redis_url": "redis://cache:6379"}}"#)
                .unwrap();
        assert_eq!(config.cache.backend, CacheBackendKind::Redis);
        assert_eq!(config.cache.entity_ttl_secs, 1800);
        assert_eq!(config.api.max_page_size, 100);
    }
}
