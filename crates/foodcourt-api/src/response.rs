//! API Response wrapper

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use foodcourt_core::error::DomainError;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Map a domain error to an HTTP error response. Retryable
/// infrastructure faults get 503 so callers (the payment gateway in
/// particular) know to retry.
pub fn domain_error_response(err: &DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, code) = match err {
        DomainError::OrderNotFound(_)
        | DomainError::TenantNotFound
        | DomainError::TicketNotFound
        | DomainError::CustomerNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DomainError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        _ if err.is_retryable() => (StatusCode::SERVICE_UNAVAILABLE, "RETRYABLE_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };
    (status, Json(ApiResponse::error(code, &err.to_string())))
}
