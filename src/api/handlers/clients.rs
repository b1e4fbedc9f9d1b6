//! Client API handlers.
//!
//! Listings answer 404 when they would be empty; single-client routes answer
//! 404 when the id is unknown.

use crate::api::doc::CLIENT_TAG;
use crate::api::dto::{ClientResponse, CreateClientRequest, ErrorResponse, PageParams, UpdateClientRequest};
use crate::error::{AppError, AppResult};
use crate::models::{Client, ClientFilter};
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const NO_CLIENTS: &str = "No clients found";
const NO_SUCH_CLIENT: &str = "No such client found";

/// Creates client routes.
pub fn client_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_clients, create_client))
        .routes(routes!(list_clients_by_page))
        .routes(routes!(filter_clients))
        .routes(routes!(get_client, update_client, delete_client))
}

fn non_empty(clients: Vec<Client>) -> AppResult<Json<Vec<ClientResponse>>> {
    if clients.is_empty() {
        return Err(AppError::not_found(NO_CLIENTS));
    }
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

/// List all clients
#[utoipa::path(
    get,
    path = "/clients",
    tag = CLIENT_TAG,
    responses(
        (status = 200, description = "All clients", body = Vec<ClientResponse>),
        (status = 404, description = "No clients exist", body = ErrorResponse)
    )
)]
async fn list_clients(State(state): State<AppState>) -> AppResult<Json<Vec<ClientResponse>>> {
    non_empty(state.services.clients.list().await?)
}

/// List one page of clients ordered by id
#[utoipa::path(
    get,
    path = "/clients/ByPage",
    tag = CLIENT_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Requested page", body = Vec<ClientResponse>),
        (status = 400, description = "Invalid page parameters", body = ErrorResponse),
        (status = 404, description = "Page is empty", body = ErrorResponse)
    )
)]
async fn list_clients_by_page(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> AppResult<Json<Vec<ClientResponse>>> {
    let clients = state
        .services
        .clients
        .list_by_page(params.page, params.page_size)
        .await?;
    non_empty(clients)
}

/// Find clients by name and birth date parts
#[utoipa::path(
    get,
    path = "/clients/filter",
    tag = CLIENT_TAG,
    params(ClientFilter),
    responses(
        (status = 200, description = "Matching clients", body = Vec<ClientResponse>),
        (status = 400, description = "Date part out of range", body = ErrorResponse),
        (status = 404, description = "Nothing matched", body = ErrorResponse)
    )
)]
async fn filter_clients(
    State(state): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<ClientFilter>,
) -> AppResult<Json<Vec<ClientResponse>>> {
    non_empty(state.services.clients.list_filtered(&filter).await?)
}

/// Get a client by id
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = CLIENT_TAG,
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found", body = ClientResponse),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ClientResponse>> {
    state
        .services
        .clients
        .get(id)
        .await?
        .map(|client| Json(client.into()))
        .ok_or_else(|| AppError::not_found(NO_SUCH_CLIENT))
}

/// Replace a client
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = CLIENT_TAG,
    params(("id" = i32, Path, description = "Client ID")),
    request_body = UpdateClientRequest,
    responses(
        (status = 204, description = "Client updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateClientRequest>,
) -> AppResult<StatusCode> {
    match state.services.clients.update(id, payload.into_changes()).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::not_found(NO_SUCH_CLIENT)),
    }
}

/// Create a client
#[utoipa::path(
    post,
    path = "/clients",
    tag = CLIENT_TAG,
    request_body = CreateClientRequest,
    responses(
        (status = 200, description = "Client created", body = ClientResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateClientRequest>,
) -> AppResult<Json<ClientResponse>> {
    let client = state.services.clients.create(payload.into_new_client()).await?;
    Ok(Json(client.into()))
}

/// Delete a client and all of its orders
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = CLIENT_TAG,
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if state.services.clients.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(NO_SUCH_CLIENT))
    }
}
