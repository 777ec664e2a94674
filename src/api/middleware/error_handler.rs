//! Error handler for converting AppError to HTTP responses.
//!
//! Implements `IntoResponse` for `AppError` and converts axum extractor
//! rejections into `AppError::BadRequest`. Storage failures are logged here
//! and answered with a sanitized message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate, Validation, BadRequest → 400 BAD_REQUEST
    /// - Database, Configuration, Internal → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);

        let body = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::new(code, format!("{} not found", entity)).with_details(json!({
                "entity": entity,
                "field": field,
                "value": value
            })),
            AppError::Duplicate {
                entity,
                field,
                value,
            } => ErrorResponse::new(code, self.to_string()).with_details(json!({
                "entity": entity,
                "field": field,
                "value": value
            })),
            AppError::Validation { field, reason } => {
                ErrorResponse::new(code, reason.clone()).with_details(json!({ "field": field }))
            }
            AppError::BadRequest { message } => ErrorResponse::new(code, message.clone()),
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = %source, "Database operation failed");
                ErrorResponse::new(code, format!("Database operation failed: {}", operation))
                    .with_details(json!({ "operation": operation }))
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = %source, "Configuration error");
                ErrorResponse::new(code, format!("Configuration error: {}", key))
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = %source, "Connection pool error");
                ErrorResponse::new(code, "Database connection unavailable")
            }
            AppError::Internal { source } => {
                tracing::error!(error = %source, "Internal error");
                ErrorResponse::new(code, "An internal error occurred")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON body: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing or invalid Content-Type header, expected application/json".to_string()
            }
            other => format!("Failed to read JSON body: {}", other.body_text()),
        };
        AppError::bad_request(message)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::BAD_REQUEST,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}
