//! Order API handlers, including the two reports.

use crate::api::doc::ORDER_TAG;
use crate::api::dto::{
    AvgCheckByHourResponse, BirthdaySumResponse, CreateOrderRequest, ErrorResponse, OrderResponse,
    OrderWithClientResponse, PageParams, UpdateOrderRequest,
};
use crate::error::{AppError, AppResult};
use crate::models::OrderFilter;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const NO_ORDERS: &str = "No orders found";
const NO_SUCH_ORDER: &str = "No such order found";

/// Creates order routes.
pub fn order_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_orders, create_order))
        .routes(routes!(list_orders_with_clients))
        .routes(routes!(filter_orders))
        .routes(routes!(list_orders_by_page))
        .routes(routes!(get_order, update_order, delete_order))
        .routes(routes!(report_avg))
        .routes(routes!(report_sum))
}

fn non_empty<T, R: From<T>>(rows: Vec<T>) -> AppResult<Json<Vec<R>>> {
    if rows.is_empty() {
        return Err(AppError::not_found(NO_ORDERS));
    }
    Ok(Json(rows.into_iter().map(R::from).collect()))
}

/// List all orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = ORDER_TAG,
    responses(
        (status = 200, description = "All orders", body = Vec<OrderResponse>),
        (status = 404, description = "No orders exist", body = ErrorResponse)
    )
)]
async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<OrderResponse>>> {
    non_empty(state.services.orders.list().await?)
}

/// List orders with their client embedded
#[utoipa::path(
    get,
    path = "/orders/WithClients",
    tag = ORDER_TAG,
    responses(
        (status = 200, description = "Orders with clients", body = Vec<OrderWithClientResponse>),
        (status = 404, description = "No orders exist", body = ErrorResponse)
    )
)]
async fn list_orders_with_clients(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OrderWithClientResponse>>> {
    non_empty(state.services.orders.list_with_clients().await?)
}

/// Find orders by amount, status, date parts and client
///
/// `amount` keeps orders strictly above it; zero or negative `amount` and
/// `client_id` are ignored.
#[utoipa::path(
    get,
    path = "/orders/filter",
    tag = ORDER_TAG,
    params(OrderFilter),
    responses(
        (status = 200, description = "Matching orders", body = Vec<OrderResponse>),
        (status = 400, description = "Date part out of range", body = ErrorResponse),
        (status = 404, description = "Nothing matched", body = ErrorResponse)
    )
)]
async fn filter_orders(
    State(state): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<OrderFilter>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    non_empty(state.services.orders.list_filtered(&filter).await?)
}

/// List one page of orders ordered by id
#[utoipa::path(
    get,
    path = "/orders/ByPage",
    tag = ORDER_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Requested page", body = Vec<OrderResponse>),
        (status = 400, description = "Invalid page parameters", body = ErrorResponse),
        (status = 404, description = "Page is empty", body = ErrorResponse)
    )
)]
async fn list_orders_by_page(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = state
        .services
        .orders
        .list_by_page(params.page, params.page_size)
        .await?;
    non_empty(orders)
}

/// Get an order by id
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderResponse>> {
    state
        .services
        .orders
        .get(id)
        .await?
        .map(|order| Json(order.into()))
        .ok_or_else(|| AppError::not_found(NO_SUCH_ORDER))
}

/// Replace an order
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 204, description = "Order updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderRequest>,
) -> AppResult<StatusCode> {
    match state.services.orders.update(id, payload.into_changes()).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::not_found(NO_SUCH_ORDER)),
    }
}

/// Create an order
#[utoipa::path(
    post,
    path = "/orders",
    tag = ORDER_TAG,
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Client does not exist", body = ErrorResponse)
    )
)]
async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    let order = state.services.orders.create(payload.into_new_order()).await?;
    Ok(Json(order.into()))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if state.services.orders.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(NO_SUCH_ORDER))
    }
}

/// Average completed-order amount per UTC hour, highest first
#[utoipa::path(
    get,
    path = "/orders/report/avg",
    tag = ORDER_TAG,
    responses((status = 200, description = "Report rows, possibly empty", body = Vec<AvgCheckByHourResponse>))
)]
async fn report_avg(State(state): State<AppState>) -> AppResult<Json<Vec<AvgCheckByHourResponse>>> {
    let rows = state.services.orders.report_avg().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Completed-order totals per client for orders placed on their birthday
#[utoipa::path(
    get,
    path = "/orders/report/sum",
    tag = ORDER_TAG,
    responses((status = 200, description = "Report rows, possibly empty", body = Vec<BirthdaySumResponse>))
)]
async fn report_sum(State(state): State<AppState>) -> AppResult<Json<Vec<BirthdaySumResponse>>> {
    let rows = state.services.orders.report_sum().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
