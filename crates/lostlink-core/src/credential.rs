//! The single admin credential and the register-or-sign-in flow around it.
//!
//! There is exactly one admin. The first successful submission registers the
//! pair; every later submission must match it exactly. Comparison is plain
//! text.

use std::{future::Future, sync::Mutex};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Error, Result};

/// Fixed key the credential record is stored under.
pub const CREDENTIAL_KEY: &str = "lostLinkUser";

/// The stored admin email/password pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredential {
  pub email:    String,
  pub password: String,
}

impl std::fmt::Debug for AdminCredential {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AdminCredential")
      .field("email", &self.email)
      .field("password", &"[REDACTED]")
      .finish()
  }
}

impl AdminCredential {
  pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
    Self { email: email.into(), password: password.into() }
  }

  fn matches(&self, email: &str, password: &str) -> bool {
    self.email == email && self.password == password
  }
}

/// How a successful [`login`] went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
  /// No admin existed; the submitted pair is now the admin.
  Registered,
  /// The submitted pair matched the stored admin.
  SignedIn,
}

/// Persistence for the one credential record.
pub trait CredentialStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The stored record, if an admin has registered.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Option<AdminCredential>, Self::Error>> + Send + '_;

  /// Store `credential`, replacing any existing record.
  fn save(
    &self,
    credential: AdminCredential,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

fn store_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
  Error::CredentialStore(Box::new(e))
}

/// Register the first admin or check a sign-in attempt.
pub async fn login<S: CredentialStore>(
  store: &S,
  email: &str,
  password: &str,
) -> Result<LoginOutcome> {
  match store.load().await.map_err(store_error)? {
    Some(stored) if stored.matches(email, password) => Ok(LoginOutcome::SignedIn),
    Some(_) => Err(Error::InvalidCredentials),
    None => {
      if email.is_empty() || password.is_empty() {
        return Err(Error::IncompleteRegistration);
      }
      store
        .save(AdminCredential::new(email, password))
        .await
        .map_err(store_error)?;
      info!(email, "registered admin account");
      Ok(LoginOutcome::Registered)
    }
  }
}

/// Check credentials without ever registering. Fails when no admin exists.
pub async fn verify<S: CredentialStore>(
  store: &S,
  email: &str,
  password: &str,
) -> Result<()> {
  match store.load().await.map_err(store_error)? {
    Some(stored) if stored.matches(email, password) => Ok(()),
    _ => Err(Error::InvalidCredentials),
  }
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// A [`CredentialStore`] that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
  record: Mutex<Option<AdminCredential>>,
}

/// The in-memory store's lock was poisoned by a panicking writer.
#[derive(Debug, thiserror::Error)]
#[error("credential lock poisoned")]
pub struct PoisonedLock;

impl MemoryCredentialStore {
  pub fn new() -> Self { Self::default() }
}

impl CredentialStore for MemoryCredentialStore {
  type Error = PoisonedLock;

  async fn load(&self) -> Result<Option<AdminCredential>, PoisonedLock> {
    Ok(self.record.lock().map_err(|_| PoisonedLock)?.clone())
  }

  async fn save(&self, credential: AdminCredential) -> Result<(), PoisonedLock> {
    *self.record.lock().map_err(|_| PoisonedLock)? = Some(credential);
    Ok(())
  }
}
