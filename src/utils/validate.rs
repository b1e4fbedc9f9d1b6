//! Extractors that deserialize and then validate request input.
//!
//! Rejections and validation failures both surface as [`AppError`], so
//! handlers get the standard error body without extra mapping.

use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that passed `Validate`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that passed `Validate`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientFilter;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct NamePayload {
        #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
        name: String,
        #[validate(range(min = 1, message = "Client id must be positive"))]
        client_id: i32,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn query_parts(uri: &str) -> Parts {
        let (parts, _) = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn test_valid_json() {
        let request = json_request(r#"{"name":"Ivan","client_id":3}"#);

        let ValidatedJson(payload) = ValidatedJson::<NamePayload>::from_request(request, &())
            .await
            .unwrap();

        assert_eq!(payload.name, "Ivan");
        assert_eq!(payload.client_id, 3);
    }

    #[tokio::test]
    async fn test_json_validation_errors_are_collected() {
        let request = json_request(r#"{"name":"","client_id":0}"#);

        match ValidatedJson::<NamePayload>::from_request(request, &()).await {
            Err(AppError::ValidationErrors { errors }) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["client_id", "name"]);
            }
            other => panic!("Expected ValidationErrors, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request(r#"{"name":"Ivan""#);

        let result = ValidatedJson::<NamePayload>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"name":"Ivan","client_id":3}"#))
            .unwrap();

        let result = ValidatedJson::<NamePayload>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_valid_query() {
        let mut parts = query_parts("/clients/filter?first_name=Ivan&month=1");

        let ValidatedQuery(filter) = ValidatedQuery::<ClientFilter>::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(filter.first_name(), Some("Ivan"));
        assert_eq!(filter.month, Some(1));
        assert_eq!(filter.day, None);
    }

    #[tokio::test]
    async fn test_query_out_of_range_is_validation_error() {
        let mut parts = query_parts("/clients/filter?day=32");

        match ValidatedQuery::<ClientFilter>::from_request_parts(&mut parts, &()).await {
            Err(AppError::ValidationErrors { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "day");
                assert_eq!(errors[0].message, "Day must be between 1 and 31");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_query_type_mismatch_is_bad_request() {
        let mut parts = query_parts("/clients/filter?year=soon");

        let result = ValidatedQuery::<ClientFilter>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
