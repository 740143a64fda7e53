//! Error types for pitchboard.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Startup not found: {0}")]
    StartupNotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation error: {0}")]
    Validation(String),

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::StartupNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,

            // 5xx Server Errors
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::StartupNotFound(_) => "STARTUP_NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Failure kinds of the vote actions.
///
/// Vote actions return these as values; they serialize to the
/// `SCREAMING_SNAKE_CASE` strings used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("startup not found")]
    StartupNotFound,

    #[error("invalid vote data")]
    ValidationError,

    #[error("store unreachable")]
    NetworkError,

    #[error("unknown error")]
    UnknownError,
}

impl VoteError {
    /// Wire code of this error kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::StartupNotFound => "STARTUP_NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Parse a wire code. Unrecognised codes become [`VoteError::UnknownError`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "UNAUTHENTICATED" => Self::Unauthenticated,
            "STARTUP_NOT_FOUND" => Self::StartupNotFound,
            "VALIDATION_ERROR" => Self::ValidationError,
            "NETWORK_ERROR" => Self::NetworkError,
            _ => Self::UnknownError,
        }
    }

    /// Fixed user-facing message for this error kind.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::Unauthenticated => "Please sign in to vote on startups.",
            Self::StartupNotFound => "This startup could not be found.",
            Self::NetworkError => "Network error. Please try again.",
            Self::ValidationError => "Invalid vote data. Please try again.",
            Self::UnknownError => "An unexpected error occurred. Please try again.",
        }
    }

    /// HTTP status used when this error crosses the API.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::StartupNotFound => StatusCode::NOT_FOUND,
            Self::ValidationError => StatusCode::BAD_REQUEST,
            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,
            Self::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for VoteError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Unauthorized => Self::Unauthenticated,
            AppError::StartupNotFound(_) => Self::StartupNotFound,
            AppError::Validation(_) => Self::ValidationError,
            AppError::Database(_) => Self::NetworkError,
            AppError::Config(_) | AppError::Internal(_) => Self::UnknownError,
        }
    }
}
