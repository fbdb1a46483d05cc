//! Handler for `POST /intake/parse` (smart entry).
//!
//! Returns a prefilled draft for the client to review; nothing is saved.

use std::sync::Arc;

use axum::{Json, extract::State};
use lostlink_core::{
  credential::CredentialStore,
  intake::{self, ItemDraft},
  parser::ItemParser,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, extract};

#[derive(Debug, Deserialize)]
pub struct ParseBody {
  #[serde(default)]
  pub description: String,
  /// The form as it currently stands; a blank draft when omitted.
  #[serde(default)]
  pub draft:       Option<ItemDraft>,
}

/// `POST /intake/parse` with body `{"description": "...", "draft": {...}}`
pub async fn parse<C, P>(
  State(state): State<AppState<C, P>>,
  extract::Json(body): extract::Json<ParseBody>,
) -> Result<Json<ItemDraft>, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let today = intake::today();
  let mut draft = body.draft.unwrap_or_else(|| ItemDraft::new(today));
  let parser = Arc::clone(&state.parser);
  intake::prefill(&*parser, &body.description, &mut draft, today).await?;
  Ok(Json(draft))
}
