//! [`SqliteCredentialStore`]: the SQLite implementation of
//! [`CredentialStore`].

use std::path::Path;

use lostlink_core::credential::{AdminCredential, CREDENTIAL_KEY, CredentialStore};
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Admin credential storage backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteCredentialStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteCredentialStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Raw JSON stored under `key`, if any.
  async fn get_value(&self, key: &'static str) -> Result<Option<String>> {
    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM kv WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(value)
  }

  /// Insert or overwrite the JSON stored under `key`.
  async fn put_value(&self, key: &'static str, value: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO kv (key, value) VALUES (?1, ?2)
           ON CONFLICT(key) DO UPDATE SET value = excluded.value",
          rusqlite::params![key, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteCredentialStore {
  type Error = crate::Error;

  async fn load(&self) -> Result<Option<AdminCredential>> {
    let raw = self.get_value(CREDENTIAL_KEY).await?;
    Ok(raw.as_deref().map(serde_json::from_str).transpose()?)
  }

  async fn save(&self, credential: AdminCredential) -> Result<()> {
    let json = serde_json::to_string(&credential)?;
    self.put_value(CREDENTIAL_KEY, json).await?;
    debug!(key = CREDENTIAL_KEY, "stored admin credential");
    Ok(())
  }
}
