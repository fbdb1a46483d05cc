//! Handlers for `/settings/notifications`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/settings/notifications` | Password blanked |
//! | `PUT`  | `/settings/notifications` | Replaces the whole record |
//! | `POST` | `/settings/notifications/test` | Simulated send; 409 while one is running |

use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use axum::{Json, extract::State};
use lostlink_core::{
  credential::CredentialStore,
  parser::ItemParser,
  settings::{NotificationSettings, TEST_SEND_DELAY},
};
use serde::Serialize;
use tracing::info;

use crate::{AppState, error::ApiError, extract};

/// `GET /settings/notifications`
pub async fn get_notifications<C, P>(
  State(state): State<AppState<C, P>>,
) -> Json<NotificationSettings>
where
  C: CredentialStore,
  P: ItemParser,
{
  Json(state.settings.read().await.redacted())
}

/// `PUT /settings/notifications`
pub async fn put_notifications<C, P>(
  State(state): State<AppState<C, P>>,
  extract::Json(body): extract::Json<NotificationSettings>,
) -> Json<NotificationSettings>
where
  C: CredentialStore,
  P: ItemParser,
{
  info!(settings = ?body, "notification settings saved");
  let redacted = body.redacted();
  *state.settings.write().await = body;
  Json(redacted)
}

// ─── Test send ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TestSent {
  pub message: String,
}

/// Clears the in-flight flag when dropped, including on client disconnect.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
  fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
    flag
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| Self(Arc::clone(flag)))
  }
}

impl Drop for InFlight {
  fn drop(&mut self) { self.0.store(false, Ordering::Release); }
}

/// `POST /settings/notifications/test`
pub async fn send_test<C, P>(
  State(state): State<AppState<C, P>>,
) -> Result<Json<TestSent>, ApiError>
where
  C: CredentialStore,
  P: ItemParser,
{
  let settings = state.settings.read().await.clone();
  settings.check_ready_for_test()?;

  let _guard = InFlight::acquire(&state.mail_test_in_flight)
    .ok_or_else(|| ApiError::Conflict("A test email is already being sent.".into()))?;

  tokio::time::sleep(TEST_SEND_DELAY).await;
  info!(to = %settings.sender_email, "simulated test email sent");
  Ok(Json(TestSent { message: settings.test_sent_message() }))
}
