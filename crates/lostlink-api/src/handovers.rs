//! Handler for `GET /handovers[?q=<text>]`: claimed items and who collected
//! them.

use axum::{
  Json,
  extract::{Query, State},
};
use lostlink_core::{
  credential::CredentialStore, handover, item::Item, parser::ItemParser,
};

use crate::{AppState, items::SearchParams};

pub async fn search<C, P>(
  State(state): State<AppState<C, P>>,
  Query(params): Query<SearchParams>,
) -> Json<Vec<Item>>
where
  C: CredentialStore,
  P: ItemParser,
{
  let ledger = state.ledger.read().await;
  let query = params.q.unwrap_or_default();
  Json(
    handover::search_claimed(&ledger, &query)
      .into_iter()
      .cloned()
      .collect(),
  )
}
