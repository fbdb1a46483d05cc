//! JSON REST API for LostLink.
//!
//! Exposes an axum [`Router`] over an [`AppState`] holding the lost/found
//! [`Ledger`], the admin [`CredentialStore`] and an [`ItemParser`]. Every
//! route except `POST /login` requires HTTP Basic credentials matching the
//! registered admin. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lostlink_api::api_router(state))
//! ```

pub mod auth;
pub mod error;
pub mod extract;
pub mod handovers;
pub mod intake;
pub mod items;
pub mod matches;
pub mod reports;
pub mod settings;

#[cfg(test)]
mod tests;

use std::sync::{Arc, atomic::AtomicBool};

use axum::{
  Router, middleware,
  routing::{get, post},
};
use lostlink_core::{
  credential::CredentialStore, ledger::Ledger, parser::ItemParser,
  settings::NotificationSettings,
};
use tokio::sync::RwLock;

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
///
/// Item data and notification settings live only in memory; the credential
/// store is the one persistent piece.
pub struct AppState<C, P> {
  pub ledger:              Arc<RwLock<Ledger>>,
  pub credentials:         Arc<C>,
  pub parser:              Arc<P>,
  pub settings:            Arc<RwLock<NotificationSettings>>,
  /// Set while a simulated test email is being "sent".
  pub mail_test_in_flight: Arc<AtomicBool>,
}

impl<C, P> AppState<C, P> {
  pub fn new(ledger: Ledger, credentials: C, parser: P) -> Self {
    Self {
      ledger:              Arc::new(RwLock::new(ledger)),
      credentials:         Arc::new(credentials),
      parser:              Arc::new(parser),
      settings:            Arc::new(RwLock::new(NotificationSettings::default())),
      mail_test_in_flight: Arc::new(AtomicBool::new(false)),
    }
  }
}

impl<C, P> Clone for AppState<C, P> {
  fn clone(&self) -> Self {
    Self {
      ledger:              Arc::clone(&self.ledger),
      credentials:         Arc::clone(&self.credentials),
      parser:              Arc::clone(&self.parser),
      settings:            Arc::clone(&self.settings),
      mail_test_in_flight: Arc::clone(&self.mail_test_in_flight),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<C, P>(state: AppState<C, P>) -> Router<()>
where
  C: CredentialStore + 'static,
  P: ItemParser + 'static,
{
  let protected = Router::new()
    // Items
    .route("/{kind}", get(items::list::<C, P>).post(items::create::<C, P>))
    .route(
      "/{kind}/{id}",
      get(items::get_one::<C, P>)
        .put(items::update::<C, P>)
        .delete(items::delete_one::<C, P>),
    )
    // Derived views
    .route("/matches", get(matches::list::<C, P>))
    .route("/dashboard", get(matches::dashboard::<C, P>))
    .route("/reports/locations", get(reports::locations::<C, P>))
    .route("/reports/statuses", get(reports::statuses::<C, P>))
    .route("/reports/export.csv", get(reports::export_csv::<C, P>))
    .route("/handovers", get(handovers::search::<C, P>))
    // Intake
    .route("/intake/parse", post(intake::parse::<C, P>))
    // Settings
    .route(
      "/settings/notifications",
      get(settings::get_notifications::<C, P>).put(settings::put_notifications::<C, P>),
    )
    .route("/settings/notifications/test", post(settings::send_test::<C, P>))
    .route_layer(middleware::from_fn_with_state(
      state.clone(),
      auth::require_admin::<C, P>,
    ));

  Router::new()
    .route("/login", post(auth::login::<C, P>))
    .merge(protected)
    .with_state(state)
}
