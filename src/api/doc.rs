use utoipa::OpenApi;

pub const CLIENT_TAG: &str = "Clients";
pub const ORDER_TAG: &str = "Orders";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orders API",
        description = "Clients, their orders and order reports",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::error::ValidationFieldError,
            crate::models::OrderStatus,
        )
    ),
    tags(
        (name = CLIENT_TAG, description = "Client management endpoints"),
        (name = ORDER_TAG, description = "Order management and report endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
