//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A catalog fetch failed; the request cannot be served.
  #[error("upstream error: {0}")]
  Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The spectra program failed or produced something other than JSON.
  #[error("{message}")]
  Spectra { message: String, details: String },

  #[error("internal error: {0}")]
  Internal(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Upstream(e) => {
        tracing::error!(error = %e, "catalog fetch failed");
        (StatusCode::BAD_GATEWAY, json!({ "error": e.to_string() }))
      }
      ApiError::Spectra { message, details } => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": message, "details": details }),
      ),
      ApiError::Internal(m) => {
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": m }))
      }
    };
    (status, Json(body)).into_response()
  }
}
