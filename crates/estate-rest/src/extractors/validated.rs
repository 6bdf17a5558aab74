//! Validated query extractor.
//!
//! `ValidatedQuery<T>` deserializes the query string and validates it using
//! the `validator` crate. Failures are answered with 400 Bad Request and
//! field-level error details.

use crate::responses::ApiResponse;
use estate_core::{validation_errors_to_field_errors, ErrorResponse};
use axum::{
    async_trait,
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Query extractor that validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use estate_rest::extractors::ValidatedQuery;
///
/// async fn search(ValidatedQuery(query): ValidatedQuery<SearchQuery>) {
///     // query is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated query extraction.
#[derive(Debug)]
pub enum ValidatedQueryRejection {
    /// The query string could not be deserialized.
    QueryError(QueryRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl ValidatedQueryRejection {
    fn error_response(&self) -> ErrorResponse {
        match self {
            Self::QueryError(rejection) => ErrorResponse {
                code: "INVALID_QUERY".to_string(),
                message: format!("Invalid query string: {rejection}"),
                details: None,
            },
            Self::ValidationError(errors) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(validation_errors_to_field_errors(errors)),
            },
        }
    }
}

impl IntoResponse for ValidatedQueryRejection {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()>::error(self.error_response()));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidatedQueryRejection::QueryError)?;

        value
            .validate()
            .map_err(ValidatedQueryRejection::ValidationError)?;

        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::SearchQuery;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<ValidatedQuery<SearchQuery>, ValidatedQueryRejection> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedQuery::<SearchQuery>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_query_passes() {
        let ValidatedQuery(query) = extract("/search?name=Casa&min_price=100&max_price=200")
            .await
            .unwrap();
        assert_eq!(query.name.as_deref(), Some("Casa"));
        assert_eq!(query.max_price, Some(200.0));
    }

    #[tokio::test]
    async fn test_inverted_range_reports_details() {
        let rejection = extract("/search?min_price=300&max_price=100").await.unwrap_err();
        let response = rejection.error_response();

        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].code, "price_range");
    }

    #[tokio::test]
    async fn test_unparsable_number_rejected() {
        let rejection = extract("/search?min_price=cheap").await.unwrap_err();
        assert!(matches!(rejection, ValidatedQueryRejection::QueryError(_)));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
