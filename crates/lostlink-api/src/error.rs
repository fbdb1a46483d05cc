//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use lostlink_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Well-formed body whose fields fail validation.
  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// The description parser failed; the message is the user-facing advisory.
  #[error("{0}")]
  BadGateway(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    match e {
      CoreError::MissingField(_) | CoreError::InvalidDate(_) => {
        ApiError::Unprocessable(e.to_string())
      }
      CoreError::DuplicateId(_) => ApiError::Conflict(e.to_string()),
      CoreError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
      CoreError::IncompleteRegistration
      | CoreError::EmptyDescription
      | CoreError::IncompleteMailSettings => ApiError::BadRequest(e.to_string()),
      CoreError::ParseFailed(_) => ApiError::BadGateway(e.to_string()),
      CoreError::CredentialStore(inner) => ApiError::Internal(inner),
      CoreError::Export(inner) => ApiError::Internal(Box::new(inner)),
      CoreError::IdsExhausted => ApiError::Internal(Box::new(e)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    match rejection {
      JsonRejection::JsonDataError(e) => ApiError::Unprocessable(e.body_text()),
      other => ApiError::BadRequest(other.body_text()),
    }
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::BadGateway(m) => (StatusCode::BAD_GATEWAY, m.clone()),
      ApiError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    let mut res = (status, Json(json!({ "error": message }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"lostlink\""),
      );
    }
    res
  }
}
