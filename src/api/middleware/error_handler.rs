//! Conversion of errors into HTTP responses.
//!
//! `AppError` renders as an [`ErrorResponse`] with a status taken from
//! [`error_to_status_code`]. Server-side failures are logged with their full
//! source chain while the body only names the failed operation.
//! [`global_error_handler`] gives non-JSON error responses produced outside
//! the handlers (unknown routes, wrong methods) the same shape.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::request_id::current_request_id;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Largest upstream error body read back when normalizing
const MAX_ERROR_BODY: usize = 64 * 1024;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_to_response_with_request_id(self, current_request_id())
    }
}

pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::ValidationErrors { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::WriteConflict { .. }
        | AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::WriteConflict { .. } => "WRITE_CONFLICT",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Builds the error response, attaching `request_id` when known.
pub fn error_to_response_with_request_id(error: AppError, request_id: Option<String>) -> Response {
    let status = error_to_status_code(&error);
    let code = error_to_code(&error);

    if status.is_server_error() {
        tracing::error!(
            code,
            request_id = request_id.as_deref().unwrap_or("unknown"),
            error = %error_chain(&error),
            "Request failed"
        );
    }

    let mut body = match &error {
        AppError::NotFound { message } | AppError::BadRequest { message } => {
            ErrorResponse::new(code, message.as_str())
        }
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new(code, "Validation failed").with_details(json!(errors))
        }
        AppError::WriteConflict { operation, .. } => ErrorResponse::new(
            code,
            format!("Concurrent modification during {operation}"),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Database { operation, .. } => {
            ErrorResponse::new(code, format!("Database operation failed: {operation}"))
                .with_details(json!({ "operation": operation }))
        }
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, format!("Configuration error: {key}"))
                .with_details(json!({ "key": key }))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Database connection unavailable")
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    };

    if let Some(id) = request_id {
        body = body.with_request_id(&id);
    }

    (status, Json(body)).into_response()
}

/// Renders the error and its sources as one message for the log.
fn error_chain(error: &AppError) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Rewrites 4xx/5xx responses that are not JSON into an [`ErrorResponse`].
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, MAX_ERROR_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let (code, fallback) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::SERVICE_UNAVAILABLE => {
            ("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
        }
        s if s.is_server_error() => ("INTERNAL_ERROR", "An internal server error occurred"),
        _ => ("UNKNOWN_ERROR", "An unknown error occurred"),
    };

    // 5xx bodies are never echoed back
    let message = if original.is_empty() || status.is_server_error() {
        fallback.to_string()
    } else {
        original
    };

    let mut body = ErrorResponse::new(code, message);
    if let Some(id) = current_request_id() {
        body = body.with_request_id(&id);
    }
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_and_code_mapping() {
        let cases: Vec<(AppError, StatusCode, &str)> = vec![
            (AppError::not_found("No clients found"), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::ValidationErrors { errors: vec![] },
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                AppError::BadRequest { message: "bad".to_string() },
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (
                AppError::WriteConflict {
                    operation: "update order".to_string(),
                    source: anyhow::anyhow!("serialization failure"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "WRITE_CONFLICT",
            ),
            (
                AppError::Database {
                    operation: "insert order".to_string(),
                    source: anyhow::anyhow!("fk"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
            ),
            (
                AppError::ConnectionPool { source: anyhow::anyhow!("timeout") },
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
            ),
            (
                AppError::Configuration {
                    key: "database.url".to_string(),
                    source: anyhow::anyhow!("missing"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
            ),
            (
                AppError::Internal { source: anyhow::anyhow!("boom") },
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error_to_status_code(&error), status, "{error:?}");
            assert_eq!(error_to_code(&error), code, "{error:?}");
        }
    }

    #[tokio::test]
    async fn test_not_found_body_uses_literal_message() {
        let response = AppError::not_found("No such client found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"code": "NOT_FOUND", "message": "No such client found"})
        );
    }

    #[tokio::test]
    async fn test_validation_details_list_fields() {
        let error = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "month".to_string(),
                message: "Month must be between 1 and 12".to_string(),
            }],
        };

        let body = body_json(error_to_response_with_request_id(error, Some("req-9".to_string()))).await;

        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "month");
        assert_eq!(body["request_id"], "req-9");
    }

    #[tokio::test]
    async fn test_database_error_is_sanitized() {
        let error = AppError::Database {
            operation: "insert order".to_string(),
            source: anyhow::anyhow!("insert or update on table \"orders\" violates foreign key"),
        };

        let body = body_json(error.into_response()).await;

        assert_eq!(body["message"], "Database operation failed: insert order");
        assert!(!body.to_string().contains("violates"));
    }

    #[tokio::test]
    async fn test_global_handler_normalizes_unknown_route() {
        let app = Router::new()
            .route("/known", get(|| async { "ok" }))
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/known")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(response).await["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_global_handler_keeps_json_errors() {
        let app = Router::new()
            .route(
                "/gone",
                get(|| async { AppError::not_found("No orders found") }),
            )
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .oneshot(Request::builder().uri("/gone").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(body_json(response).await["message"], "No orders found");
    }

    #[tokio::test]
    async fn test_global_handler_hides_plain_text_server_errors() {
        let app = Router::new()
            .route(
                "/fail",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stack trace here") }),
            )
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .oneshot(Request::builder().uri("/fail").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "An internal server error occurred");
    }
}
