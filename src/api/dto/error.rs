//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"code": "NOT_FOUND", "message": "No clients found"}))]
pub struct ErrorResponse {
    /// Machine-readable error code, e.g. `NOT_FOUND`
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Structured details, such as the failed fields of a validation error
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    /// Correlation id copied from the `x-request-id` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = ErrorResponse::new("NOT_FOUND", "No orders found");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"code": "NOT_FOUND", "message": "No orders found"})
        );
    }

    #[test]
    fn test_details_and_request_id() {
        let body = ErrorResponse::new("VALIDATION_ERROR", "Validation failed")
            .with_details(json!([{"field": "day", "message": "Day must be between 1 and 31"}]))
            .with_request_id("req-1");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["details"][0]["field"], "day");
        assert_eq!(value["request_id"], "req-1");
    }
}
