/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; every error converts into an HTTP status and
/// a JSON body of the form `{"detail": ...}`, where `detail` is either a
/// message string or a list of field errors.
///
/// # Example
///
/// ```
/// use axum::response::IntoResponse;
/// use axum::http::StatusCode;
/// use userbase_api::error::ApiError;
///
/// let response = ApiError::BadRequest("Email already registered".to_string()).into_response();
/// assert_eq!(response.status(), StatusCode::BAD_REQUEST);
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use userbase_shared::{
    auth::password::PasswordError,
    models::user::{is_email_conflict_error, UserError},
};

/// Message returned when registration hits an existing account
pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400), including a duplicate email
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unprocessable entity (422) - malformed body or failed validation
    #[error("Validation failed: {} errors", .0.len())]
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500); the message is logged, never returned
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Service unavailable (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation, or "body" when the payload is unreadable
    pub field: String,

    /// Error message
    pub message: String,
}

impl ValidationErrorDetail {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

/// Either a plain message or a list of field errors
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<ValidationErrorDetail>),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorDetail::Message(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorDetail::Message(msg)),
            ApiError::ValidationError(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorDetail::Fields(errors))
            }
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail::Message("An internal error occurred".to_string()),
                )
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!(error = %msg, "Service unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, ErrorDetail::Message(msg))
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if is_email_conflict_error(&err) {
            return ApiError::BadRequest(EMAIL_ALREADY_REGISTERED.to_string());
        }

        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ApiError::ServiceUnavailable("Database unavailable".to_string())
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => ApiError::BadRequest(EMAIL_ALREADY_REGISTERED.to_string()),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    ValidationErrorDetail::new(
                        field.to_string(),
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Validation failed".to_string()),
                    )
                })
            })
            .collect();

        // field_errors() is a HashMap; keep responses stable
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::ValidationError(details)
    }
}
