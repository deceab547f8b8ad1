//! API errors.
//!
//! Every failure a handler can produce is an [`ApiError`]. Each variant maps
//! to a stable [`ErrorCode`] and HTTP status, and is rendered as
//! `{ "message", "code", "correlation_id" }`. Server-side failures are
//! logged with the correlation id and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use token_codec::CodecError;
use tracing::{error, warn};
use uuid::Uuid;

use crate::storage::StorageError;

/// Handler error.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body, path or query is unusable
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Addressed resource does not exist
    #[error("{resource} not found")]
    NotFound {
        /// Resource name
        resource: &'static str,
    },

    /// No bearer token on a protected route
    #[error("Token missing from request")]
    TokenMissing,

    /// Bearer token failed verification
    #[error("Token rejected")]
    TokenRejected,

    /// Password did not match
    #[error("Invalid password")]
    InvalidCredentials,

    /// Login name is unknown
    #[error("Username was not found")]
    UserNotFound,

    /// Signing or key failure
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Store failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Anything else (details never exposed)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// Malformed request
    #[serde(rename = "BAD_REQUEST")]
    BadRequest,
    /// Missing resource
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    /// No token
    #[serde(rename = "AUTH_TOKEN_MISSING")]
    TokenMissing,
    /// Token failed verification
    #[serde(rename = "AUTH_TOKEN_REJECTED")]
    TokenRejected,
    /// Wrong password
    #[serde(rename = "AUTH_INVALID_CREDENTIALS")]
    InvalidCredentials,
    /// Unknown login name
    #[serde(rename = "AUTH_USER_NOT_FOUND")]
    UserNotFound,
    /// Server fault
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::TokenMissing => "AUTH_TOKEN_MISSING",
            Self::TokenRejected => "AUTH_TOKEN_REJECTED",
            Self::InvalidCredentials => "AUTH_INVALID_CREDENTIALS",
            Self::UserNotFound => "AUTH_USER_NOT_FOUND",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::TokenMissing | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::TokenRejected => StatusCode::FORBIDDEN,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured error response with correlation ID
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub message: String,
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Correlation ID for tracing
    pub correlation_id: Uuid,
}

impl ErrorResponse {
    /// Create a response for `error`.
    #[must_use]
    pub fn from_error(error: &ApiError, correlation_id: Uuid) -> Self {
        let message = match error {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::NotFound { resource } => format!("{resource} not found"),
            ApiError::TokenMissing => "You are not authorized".to_string(),
            ApiError::TokenRejected => "Error while verifying the token".to_string(),
            ApiError::InvalidCredentials => "Invalid password".to_string(),
            ApiError::UserNotFound => "Username was not found".to_string(),
            // Never expose internal error details
            ApiError::Codec(_) | ApiError::Storage(_) | ApiError::Internal(_) => {
                "Server error".to_string()
            }
        };

        Self {
            message,
            code: error.code(),
            correlation_id,
        }
    }
}

impl ApiError {
    /// Get the error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest(_) => ErrorCode::BadRequest,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::TokenMissing => ErrorCode::TokenMissing,
            Self::TokenRejected => ErrorCode::TokenRejected,
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
            Self::UserNotFound => ErrorCode::UserNotFound,
            Self::Codec(_) | Self::Storage(_) | Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Bad request with a client-facing message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = Uuid::new_v4();
        let code = self.code();

        if code == ErrorCode::Internal {
            error!(%correlation_id, error = %self, "Request failed");
        } else {
            warn!(%correlation_id, code = code.as_str(), error = %self, "Request rejected");
        }

        let body = ErrorResponse::from_error(&self, correlation_id);
        (code.status(), Json(body)).into_response()
    }
}
