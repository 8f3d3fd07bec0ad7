//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use intake_core::validate::ValidationErrors;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Field-level rejections, returned wholesale for inline display.
  #[error("validation failed")]
  Validation(ValidationErrors),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] intake_core::Error),
}

impl From<intake_core::Error> for ApiError {
  fn from(error: intake_core::Error) -> Self {
    match error {
      intake_core::Error::LeadNotFound(id) => Self::NotFound(format!("lead {id} not found")),
      intake_core::Error::InvalidTransition { from, to } => {
        Self::Conflict(format!("cannot transition lead from {from} to {to}"))
      }
      other => Self::Store(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      Self::Validation(errors) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": errors })),
      )
        .into_response(),
      Self::BadRequest(message) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
      }
      Self::NotFound(message) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
      }
      Self::Conflict(message) => {
        (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response()
      }
      Self::Store(error) => {
        // Storage detail goes to the log, not to the client.
        tracing::error!(error = %error, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "storage failure" })),
        )
          .into_response()
      }
    }
  }
}
