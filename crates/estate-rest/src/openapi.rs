//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use estate_core::{ErrorResponse, FieldError};
use estate_service::{OwnerDto, PropertyDetailDto, PropertyDto, PropertyTraceDto};
use utoipa::OpenApi;

/// OpenAPI documentation for the listings API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estate Listings API",
        version = "1.0.0",
        description = "Read API for property listings with owners, images and sale history",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::property_controller::list_properties,
        crate::controllers::property_controller::search_properties,
        crate::controllers::property_controller::get_property,
        crate::controllers::property_controller::get_property_image,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            PropertyDto,
            PropertyDetailDto,
            OwnerDto,
            PropertyTraceDto,
            HealthResponse,
        )
    ),
    tags(
        (name = "properties", description = "Property listings"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/properties",
            "/properties/search",
            "/properties/{id}",
            "/properties/{id}/image",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
