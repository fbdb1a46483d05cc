//! Handlers for the `/lost` and `/found` collections.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/{kind}`      | Optional `?q=` over item name or location |
//! | `POST`   | `/{kind}`      | Body: item draft; 422 on validation error |
//! | `GET`    | `/{kind}/{id}` | 404 if not found |
//! | `PUT`    | `/{kind}/{id}` | Body: item draft; 404 if not found |
//! | `DELETE` | `/{kind}/{id}` | 204, or 404 if not found |
//!
//! `kind` is `lost` or `found`, case-insensitive.

use std::str::FromStr;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use lostlink_core::{
  credential::CredentialStore,
  intake::{self, ItemDraft},
  item::{Item, ItemId, ItemKind},
  parser::ItemParser,
};
use serde::Deserialize;
use tracing::info;

use crate::{
  AppState,
  error::ApiError,
  extract::{self, Path},
};

fn parse_kind(raw: &str) -> Result<ItemKind, ApiError> {
  ItemKind::from_str(raw).map_err(|_| ApiError::NotFound(format!("no collection named {raw:?}")))
}

fn item_not_found(kind: ItemKind, id: ItemId) -> ApiError {
  ApiError::NotFound(format!("{kind} item {id} not found"))
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  pub q: Option<String>,
}

/// `GET /{kind}[?q=<text>]`
pub async fn list<C, P>(
  State(state): State<AppState<C, P>>,
  Path(kind): Path<String>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Item>>, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let kind = parse_kind(&kind)?;
  let ledger = state.ledger.read().await;
  let query = params.q.unwrap_or_default();
  let items = ledger
    .collection(kind)
    .search(&query)
    .into_iter()
    .cloned()
    .collect();
  Ok(Json(items))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /{kind}`: body is an [`ItemDraft`].
pub async fn create<C, P>(
  State(state): State<AppState<C, P>>,
  Path(kind): Path<String>,
  extract::Json(draft): extract::Json<ItemDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let kind = parse_kind(&kind)?;
  let mut ledger = state.ledger.write().await;
  let item = intake::submit_new(ledger.collection_mut(kind), &draft)?;
  info!(%kind, id = item.id, item = %item.name(), "item reported");
  Ok((StatusCode::CREATED, Json(item)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /{kind}/{id}`
pub async fn get_one<C, P>(
  State(state): State<AppState<C, P>>,
  Path((kind, id)): Path<(String, ItemId)>,
) -> Result<Json<Item>, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let kind = parse_kind(&kind)?;
  let ledger = state.ledger.read().await;
  let item = ledger
    .collection(kind)
    .get(id)
    .cloned()
    .ok_or_else(|| item_not_found(kind, id))?;
  Ok(Json(item))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /{kind}/{id}`: replaces every field; the id is kept.
pub async fn update<C, P>(
  State(state): State<AppState<C, P>>,
  Path((kind, id)): Path<(String, ItemId)>,
  extract::Json(draft): extract::Json<ItemDraft>,
) -> Result<Json<Item>, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let kind = parse_kind(&kind)?;
  let mut ledger = state.ledger.write().await;
  let item = intake::submit_edit(ledger.collection_mut(kind), id, &draft)?
    .ok_or_else(|| item_not_found(kind, id))?;
  info!(%kind, id, status = %item.status(), "item updated");
  Ok(Json(item))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /{kind}/{id}`
pub async fn delete_one<C, P>(
  State(state): State<AppState<C, P>>,
  Path((kind, id)): Path<(String, ItemId)>,
) -> Result<StatusCode, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let kind = parse_kind(&kind)?;
  let mut ledger = state.ledger.write().await;
  ledger
    .collection_mut(kind)
    .delete(id)
    .ok_or_else(|| item_not_found(kind, id))?;
  info!(%kind, id, "item deleted");
  Ok(StatusCode::NO_CONTENT)
}
