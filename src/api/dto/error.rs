//! Error response DTOs.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Body of every non-2xx response. The request id travels in `x-request-id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Attaches structured details, such as the offending field.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_are_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "missing")).unwrap();
        assert_eq!(body, json!({"code": "NOT_FOUND", "message": "missing"}));
    }

    #[test]
    fn test_details_are_serialized() {
        let body = ErrorResponse::new("VALIDATION_ERROR", "Price must be greater than 0")
            .with_details(json!({"field": "Price"}));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["code"], "VALIDATION_ERROR");
        assert_eq!(value["details"]["field"], "Price");
    }
}
