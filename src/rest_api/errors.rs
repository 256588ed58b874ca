//! # REST API Errors
//!
//! Every failure a booking handler can produce, and its mapping onto an HTTP
//! status and a `{ success: false, message }` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::booking::{MalformedId, ValidationError};
use crate::store::StoreError;

use super::response::Envelope;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message sent for every 5xx; the detail only goes to the log
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Bad or missing field in the request body
    #[error("{0}")]
    Validation(String),

    /// Required query parameter absent or empty
    #[error("{0} query param is required")]
    MissingParam(&'static str),

    /// Body is not the JSON object we expect
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string could not be decoded
    #[error("Invalid query string")]
    InvalidQuery,

    /// Path id is not a booking id at all
    #[error("Invalid booking ID")]
    MalformedId,

    /// Well-formed id, no booking
    #[error("Booking not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store or unexpected failure. The payload is logged, never sent.
    #[error("Server error")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery => StatusCode::BAD_REQUEST,
            ApiError::MalformedId => StatusCode::BAD_REQUEST,

            ApiError::NotFound => StatusCode::NOT_FOUND,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<MalformedId> for ApiError {
    fn from(_: MalformedId) -> Self {
        ApiError::MalformedId
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Validation(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(status = %status, error = %detail, "request failed");
        }

        let body = Json(Envelope::failure(self.to_string()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MalformedId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingParam("email").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("disk".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_classification() {
        assert!(matches!(ApiError::from(StoreError::NotFound), ApiError::NotFound));
        assert!(matches!(
            ApiError::from(StoreError::Validation(ValidationError::Required("name"))),
            ApiError::Validation(_)
        ));

        let io_err = StoreError::io(
            "failed to write temp file",
            "/data/bookings.json.tmp",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert!(matches!(ApiError::from(io_err), ApiError::Internal(_)));
        assert!(matches!(
            ApiError::from(StoreError::LockPoisoned),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_internal_detail_not_displayed() {
        let err = ApiError::Internal("failed to fsync /var/lib/secret".to_string());
        assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::MissingParam("email").to_string(),
            "email query param is required"
        );
        assert_eq!(
            ApiError::from(ValidationError::MissingRequired).to_string(),
            "name, email and event are required"
        );
        assert_eq!(ApiError::MalformedId.to_string(), "Invalid booking ID");
        assert_eq!(ApiError::InvalidQuery.to_string(), "Invalid query string");
    }
}
