//! Error types for jxpz-finder
//!
//! Two failure classes exist in the pipeline: a fetch failure (any page-count
//! or page request failed) and a malformed record (silently dropped, never an
//! error). Only the former is represented here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::catalog_client::CatalogError;

/// Failure to retrieve a mount's records
///
/// The underlying catalog error is carried unchanged; callers do not
/// classify it.
#[derive(Debug, Error)]
#[error("Fetch failed for mount {mount}: {source}")]
pub struct FetchError {
    pub mount: String,
    #[source]
    pub source: CatalogError,
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upstream catalog failed (502)
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Fetch(ref err) => (StatusCode::BAD_GATEWAY, "FETCH_FAILED", err.to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
