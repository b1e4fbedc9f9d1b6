//! Router configuration for the API.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::config::ApiConfig;
use crate::state::AppState;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Creates the application router with all routes and middleware.
///
/// Client and order routes are nested under `api.prefix`; health routes stay
/// at the root. Layers run outermost first: compression, request id,
/// logging, then the error normalizer.
pub fn create_router(state: AppState, api: &ApiConfig) -> Router {
    let api_routes = OpenApiRouter::new()
        .merge(handlers::clients::client_routes())
        .merge(handlers::orders::order_routes());

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(&api.prefix, api_routes)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let router = if api.swagger_enabled {
        router.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, openapi))
    } else {
        router
    };

    // Last added runs first
    router
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .with_state(state)
}
