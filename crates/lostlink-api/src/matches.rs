//! Handlers for `GET /matches` and `GET /dashboard`.

use axum::{Json, extract::State};
use lostlink_core::{
  credential::CredentialStore,
  item::Item,
  matches::{PotentialMatch, ledger_matches},
  parser::ItemParser,
  report::{self, Summary},
};
use serde::Serialize;

use crate::AppState;

/// Owned copy of a [`PotentialMatch`], so it can outlive the ledger lock.
#[derive(Debug, Clone, Serialize)]
pub struct MatchPair {
  pub lost:  Item,
  pub found: Item,
}

impl From<PotentialMatch<'_>> for MatchPair {
  fn from(m: PotentialMatch<'_>) -> Self {
    Self { lost: m.lost.clone(), found: m.found.clone() }
  }
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
  pub summary: Summary,
  pub matches: Vec<MatchPair>,
}

/// `GET /matches`
pub async fn list<C, P>(State(state): State<AppState<C, P>>) -> Json<Vec<MatchPair>>
where
  C: CredentialStore,
  P: ItemParser,
{
  let ledger = state.ledger.read().await;
  Json(ledger_matches(&ledger).into_iter().map(MatchPair::from).collect())
}

/// `GET /dashboard`
pub async fn dashboard<C, P>(State(state): State<AppState<C, P>>) -> Json<Dashboard>
where
  C: CredentialStore,
  P: ItemParser,
{
  let ledger = state.ledger.read().await;
  Json(Dashboard {
    summary: report::summary(&ledger),
    matches: ledger_matches(&ledger).into_iter().map(MatchPair::from).collect(),
  })
}
