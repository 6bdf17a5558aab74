//! Main application router.

use crate::{
    controllers::{health_controller, property_controller},
    middleware::{logging_middleware, REQUEST_ID_HEADER},
    openapi::ApiDoc,
    state::AppState,
};
use estate_config::{ApiConfig, ServerConfig};
use estate_service::PropertyService;
use axum::{http::HeaderValue, middleware, routing::get, Router};
use shaku::{HasComponent, Module};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router from a Shaku module.
///
/// The module must provide the `PropertyService` component.
pub fn create_router<M>(module: &M, server_config: &ServerConfig, api_config: &ApiConfig) -> Router
where
    M: Module + HasComponent<dyn PropertyService>,
{
    let state = AppState::from_module(module, api_config.clone());
    build_router(state, server_config)
}

/// Creates the router around an existing state.
pub fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .nest("/properties", property_controller::router())
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid));

    info!("Router created with listing endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Estate Listings API v1"
}
