//! Handlers for `/reports/*`: chart tallies and the CSV download.

use axum::{
  Json,
  extract::State,
  http::header,
  response::IntoResponse,
};
use lostlink_core::{
  credential::CredentialStore,
  export::{self, EXPORT_FILE_NAME},
  parser::ItemParser,
  report::{self, Tally},
};

use crate::{AppState, error::ApiError};

/// `GET /reports/locations`
pub async fn locations<C, P>(State(state): State<AppState<C, P>>) -> Json<Vec<Tally>>
where
  C: CredentialStore,
  P: ItemParser,
{
  let ledger = state.ledger.read().await;
  Json(report::by_location(&ledger))
}

/// `GET /reports/statuses`
pub async fn statuses<C, P>(State(state): State<AppState<C, P>>) -> Json<Vec<Tally>>
where
  C: CredentialStore,
  P: ItemParser,
{
  let ledger = state.ledger.read().await;
  Json(report::by_status(&ledger))
}

/// `GET /reports/export.csv`: every item as a CSV attachment.
pub async fn export_csv<C, P>(
  State(state): State<AppState<C, P>>,
) -> Result<impl IntoResponse, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let csv = export::to_csv(&*state.ledger.read().await)?;
  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
      ),
    ],
    csv,
  ))
}
