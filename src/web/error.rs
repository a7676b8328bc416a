//! Request-scoped failures mapped to JSON error bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;

use crate::{db::DbError, services::overlays::OverlayError};

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or out-of-range request parameter (400)
    Validation(String),

    /// Unknown, missing or unreadable resource (404)
    NotFound { resource: &'static str, name: String },

    /// Store unreachable or query failed (500, 504 on timeout)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": message
                }),
            ),
            Self::NotFound { resource, name } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, name)
                }),
            ),
            Self::Database(DbError::Timeout { seconds }) => {
                error!("Database call timed out after {seconds}s");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    json!({
                        "error": "timeout",
                        "message": format!("operation timed out after {} seconds", seconds)
                    }),
                )
            }
            Self::Database(e) => {
                error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "listings are temporarily unavailable"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<OverlayError> for ApiError {
    fn from(e: OverlayError) -> Self {
        let name = match &e {
            OverlayError::UnknownLayer(name) => name.clone(),
            OverlayError::Missing { path, .. } | OverlayError::Malformed { path, .. } => {
                error!("Overlay unavailable: {e}");
                path.file_name()
                    .map(|file| file.to_string_lossy().into_owned())
                    .unwrap_or_default()
            }
        };
        Self::NotFound {
            resource: "layer",
            name,
        }
    }
}
