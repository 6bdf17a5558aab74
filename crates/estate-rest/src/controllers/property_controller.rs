//! Property listing controller.

use crate::{
    extractors::{PaginationQuery, SearchQuery, ValidatedQuery},
    responses::{found, ok, ApiResponse, ApiResult},
    state::AppState,
};
use estate_core::PagedResult;
use estate_service::{PropertyDetailDto, PropertyDto, PropertyPage};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::debug;

/// Creates the property router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties))
        .route("/search", get(search_properties))
        .route("/:id", get(get_property))
        .route("/:id/image", get(get_property_image))
}

/// List properties page by page.
#[utoipa::path(
    get,
    path = "/properties",
    tag = "properties",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of properties", body = ApiResponse<PagedResult<PropertyDto>>),
        (status = 400, description = "Malformed query"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PaginationQuery>,
) -> ApiResult<PropertyPage> {
    let page = query.to_page_request(&state.api);
    debug!(page = page.page, size = page.size, "List properties request");

    let response = state.property_service.get_page(page).await?;
    ok(response)
}

/// Search properties by name, address and price range.
#[utoipa::path(
    get,
    path = "/properties/search",
    tag = "properties",
    params(SearchQuery),
    responses(
        (status = 200, description = "Page of matching properties", body = ApiResponse<PagedResult<PropertyDto>>),
        (status = 400, description = "Invalid filter"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn search_properties(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> ApiResult<PropertyPage> {
    let page = query.to_page_request(&state.api);
    let filter = query.filter();
    debug!(?filter, page = page.page, size = page.size, "Search properties request");

    let response = state.property_service.search(filter, page).await?;
    ok(response)
}

/// Get a property with owner, images and sale history.
#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = String, Path, description = "Storage id or domain id")),
    responses(
        (status = 200, description = "Property detail", body = ApiResponse<PropertyDetailDto>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PropertyDetailDto> {
    debug!(%id, "Get property request");

    let detail = state.property_service.get_detail(&id).await?;
    found(detail, "Property", &id)
}

/// Get the first enabled image of a property.
#[utoipa::path(
    get,
    path = "/properties/{id}/image",
    tag = "properties",
    params(("id" = String, Path, description = "Storage id or domain id")),
    responses(
        (status = 200, description = "Image file reference", body = ApiResponse<String>),
        (status = 404, description = "Property or image not found")
    )
)]
pub async fn get_property_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    debug!(%id, "Get property image request");

    let image = state.property_service.get_property_image(&id).await?;
    found(image, "PropertyImage", &id)
}
