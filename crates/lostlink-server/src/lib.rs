//! Wiring for the `lostlink-server` binary: configuration loading and the
//! top-level router.

use std::path::{Path, PathBuf};

use axum::Router;
use lostlink_api::AppState;
use lostlink_core::{
  credential::CredentialStore, ledger::Ledger, parser::ItemParser, sample,
};
use lostlink_gemini::GeminiConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/lostlink/lostlink.db") }

/// Runtime server configuration, deserialised from `config.toml` and
/// `LOSTLINK_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  /// SQLite file holding the admin credential.
  #[serde(default = "default_store_path")]
  pub store_path:       PathBuf,
  /// Start with the demo lost/found records instead of empty collections.
  #[serde(default)]
  pub seed_sample_data: bool,
  #[serde(default)]
  pub gemini:           GeminiConfig,
}

impl ServerConfig {
  /// Read `path` (if it exists) and overlay `LOSTLINK_*` variables; nested
  /// keys use `__`, e.g. `LOSTLINK_GEMINI__API_KEY`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("LOSTLINK")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The ledger the server starts with.
  pub fn initial_ledger(&self) -> Ledger {
    if self.seed_sample_data {
      sample::ledger()
    } else {
      Ledger::new()
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// The full application: the API under `/api`, with request tracing.
pub fn app<C, P>(state: AppState<C, P>) -> Router
where
  C: CredentialStore + 'static,
  P: ItemParser + 'static,
{
  Router::new()
    .nest("/api", lostlink_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}
