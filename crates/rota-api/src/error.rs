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
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The client edited from a stale snapshot; `current` is the
  /// authoritative value it must re-render before retrying.
  #[error("conflict: current state is {current:?}")]
  Conflict { current: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<rota_core::Error> for ApiError {
  fn from(err: rota_core::Error) -> Self {
    match err {
      rota_core::Error::Stale { current, .. } => {
        ApiError::Conflict { current }
      }
      e @ (rota_core::Error::InvalidDay(_)
      | rota_core::Error::InvalidYear(_)
      | rota_core::Error::EmptyName) => ApiError::BadRequest(e.to_string()),
      rota_core::Error::Store(e) => ApiError::Store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m })))
          .into_response()
      }
      ApiError::Conflict { current } => (
        StatusCode::CONFLICT,
        Json(json!({ "error": "conflict", "current": current })),
      )
        .into_response(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
