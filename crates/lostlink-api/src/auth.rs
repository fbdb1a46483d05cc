//! Admin login and the HTTP Basic-auth guard for every other route.
//!
//! Basic credentials are `email:password` and are checked against the single
//! stored admin record. Nothing is cached; each request re-reads the store.

use axum::{
  Json,
  extract::{Request, State},
  http::{HeaderMap, header},
  middleware::Next,
  response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use lostlink_core::{
  credential::{self, CredentialStore, LoginOutcome},
  parser::ItemParser,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, extract};

fn unauthorized() -> ApiError { ApiError::Unauthorized("authentication required".into()) }

/// Pull `(email, password)` out of an `Authorization: Basic ...` header.
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or_else(unauthorized)?;

  let encoded = header_val.strip_prefix("Basic ").ok_or_else(unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| unauthorized())?;
  let creds = String::from_utf8(decoded).map_err(|_| unauthorized())?;

  let (email, password) = creds.split_once(':').ok_or_else(unauthorized)?;
  Ok((email.to_owned(), password.to_owned()))
}

/// Middleware rejecting requests whose Basic credentials do not match the
/// registered admin. Also rejects everything while no admin exists.
pub async fn require_admin<C, P>(
  State(state): State<AppState<C, P>>,
  req: Request,
  next: Next,
) -> Result<Response, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let (email, password) = basic_credentials(req.headers())?;
  credential::verify(&*state.credentials, &email, &password)
    .await
    .map_err(ApiError::from)?;
  Ok(next.run(req).await)
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub email:      String,
  /// `true` when this call created the admin account.
  pub registered: bool,
}

/// `POST /login`: registers the first admin, afterwards checks the pair.
pub async fn login<C, P>(
  State(state): State<AppState<C, P>>,
  extract::Json(body): extract::Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let outcome = credential::login(&*state.credentials, &body.email, &body.password).await?;
  Ok(Json(LoginResponse {
    email:      body.email,
    registered: outcome == LoginOutcome::Registered,
  }))
}
