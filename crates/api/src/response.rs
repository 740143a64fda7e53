//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pitchboard_common::VoteError;
use serde::Serialize;

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Vote action result: `{success, error?, data?}`.
///
/// The body has the same shape on failure; the status code follows the
/// error kind.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<VoteError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ActionResponse<()> {
    /// Success without a payload.
    pub const fn done() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }
}

impl<T: Serialize> ActionResponse<T> {
    /// Success with a payload.
    pub const fn with_data(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    /// Failure of the given kind.
    pub const fn failed(error: VoteError) -> Self {
        Self {
            success: false,
            error: Some(error),
            data: None,
        }
    }

    /// Build from an action result.
    pub fn from_result(result: Result<T, VoteError>) -> Self {
        result.map_or_else(Self::failed, Self::with_data)
    }
}

impl<T: Serialize> IntoResponse for ActionResponse<T> {
    fn into_response(self) -> Response {
        let status = self.error.map_or(StatusCode::OK, VoteError::status_code);
        (status, Json(self)).into_response()
    }
}
