//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the estate listings service.
///
/// Store failures surface as [`EstateError::Database`] or
/// [`EstateError::StoreUnavailable`] and are never retried by the service
/// layer. Cache backends swallow their own failures, so [`EstateError::Cache`]
/// only appears while wiring a backend up.
#[derive(Error, Debug)]
pub enum EstateError {
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// The backing store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EstateError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::StoreUnavailable(_) => 503,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if a caller could reasonably retry the operation later.
    ///
    /// The service itself fails fast; this only informs clients.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Cache(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for EstateError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::StoreUnavailable(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for EstateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from an `EstateError`.
    #[must_use]
    pub fn from_error(error: &EstateError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&EstateError> for ErrorResponse {
    fn from(error: &EstateError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(EstateError::not_found("Property", "P1").status_code(), 404);
        assert_eq!(EstateError::validation("bad price").status_code(), 400);
        assert_eq!(EstateError::StoreUnavailable("down".to_string()).status_code(), 503);
        assert_eq!(EstateError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(EstateError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EstateError::not_found("Property", 1).error_code(), "NOT_FOUND");
        assert_eq!(EstateError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(
            EstateError::StoreUnavailable("x".to_string()).error_code(),
            "STORE_UNAVAILABLE"
        );
        assert_eq!(EstateError::Cache("x".to_string()).error_code(), "CACHE_ERROR");
        assert_eq!(
            EstateError::Other(anyhow::anyhow!("boom")).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_retriable_errors() {
        assert!(EstateError::StoreUnavailable("pool timed out".to_string()).is_retriable());
        assert!(!EstateError::Database("syntax".to_string()).is_retriable());
        assert!(!EstateError::not_found("Property", 1).is_retriable());
    }

    #[test]
    fn test_sqlx_pool_timeout_maps_to_store_unavailable() {
        let err: EstateError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, EstateError::StoreUnavailable(_)));

        let err: EstateError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, EstateError::Database(_)));
    }

    #[test]
    fn test_json_error_maps_to_internal() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: EstateError = parse.unwrap_err().into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_response_from_error() {
        let err = EstateError::not_found("Property", "P1");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("P1"));
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = EstateError::validation("bad input");
        let details = vec![FieldError {
            field: "min_price".to_string(),
            message: "must be non-negative".to_string(),
            code: "range".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
