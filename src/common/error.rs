// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::error;

use super::validation::ValidationResult;

/// API error types
///
/// Each variant maps to exactly one HTTP status code in `IntoResponse`.
/// Variants carrying provider or database detail are logged server-side and
/// reported to the client with a generic message only.
#[derive(Debug)]
pub enum ApiError {
    /// No valid session credential on the request.
    Unauthenticated,
    /// OAuth callback state did not match the state cookie.
    InvalidState(String),
    /// Provider refused or botched the code-for-token exchange.
    TokenExchangeFailed(String),
    /// Provider profile endpoint failed.
    ProfileFetchFailed(String),
    /// Profile lacked a stable subject id or an email address.
    InvalidProfile(String),
    /// Missing or empty required request fields.
    InvalidInput(String),
    /// Row absent, or owned by a different user.
    NotFound(String),
    /// Required secret or credential absent from the environment.
    ConfigurationMissing(&'static str),
    DatabaseError(sqlx::Error),
    InternalServer(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthenticated => write!(f, "Unauthenticated"),
            ApiError::InvalidState(msg) => write!(f, "Invalid State: {}", msg),
            ApiError::TokenExchangeFailed(msg) => write!(f, "Token Exchange Failed: {}", msg),
            ApiError::ProfileFetchFailed(msg) => write!(f, "Profile Fetch Failed: {}", msg),
            ApiError::InvalidProfile(msg) => write!(f, "Invalid Profile: {}", msg),
            ApiError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::ConfigurationMissing(key) => write!(f, "Configuration Missing: {}", key),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// JSON error response structure
///
/// `ok: false` keeps the envelope consistent with success responses so
/// clients can branch on a single field.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message, code) = match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
                "UNAUTHENTICATED",
            ),
            ApiError::InvalidState(msg) => (StatusCode::BAD_REQUEST, msg, "INVALID_STATE"),
            ApiError::TokenExchangeFailed(detail) => {
                error!(detail = %detail, "OAuth token exchange failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "login failed".to_string(),
                    "TOKEN_EXCHANGE_FAILED",
                )
            }
            ApiError::ProfileFetchFailed(detail) => {
                error!(detail = %detail, "OAuth profile fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "login failed".to_string(),
                    "PROFILE_FETCH_FAILED",
                )
            }
            ApiError::InvalidProfile(detail) => {
                error!(detail = %detail, "provider profile missing required fields");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "login failed".to_string(),
                    "INVALID_PROFILE",
                )
            }
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, "INVALID_INPUT"),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            ApiError::ConfigurationMissing(key) => {
                error!(key = %key, "required configuration value is not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "service not configured".to_string(),
                    "CONFIGURATION_MISSING",
                )
            }
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    "DATABASE_ERROR",
                )
            }
            ApiError::InternalServer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "INTERNAL_SERVER_ERROR",
            ),
        };

        let error_response = ErrorResponse {
            ok: false,
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Helper to convert ValidationResult to ApiError
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid {
            ApiError::InternalServer(
                "Validation result was valid but converted to error".to_string(),
            )
        } else {
            let error_messages: Vec<String> = result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect();
            ApiError::InvalidInput(error_messages.join(", "))
        }
    }
}
