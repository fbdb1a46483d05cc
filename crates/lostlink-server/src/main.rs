//! lostlink-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus
//! `LOSTLINK_*` environment variables, opens the SQLite credential store, and
//! serves the JSON API under `/api`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use lostlink_api::AppState;
use lostlink_gemini::GeminiParser;
use lostlink_server::{ServerConfig, expand_tilde};
use lostlink_store_sqlite::SqliteCredentialStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "LostLink lost-and-found server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let credentials = SqliteCredentialStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let parser = GeminiParser::new(server_cfg.gemini.clone())
    .context("failed to build Gemini client")?;
  if !parser.is_configured() {
    tracing::warn!("no Gemini API key configured; smart entry will be unavailable");
  }

  let ledger = server_cfg.initial_ledger();
  tracing::info!(
    lost = ledger.lost().len(),
    found = ledger.found().len(),
    "starting with in-memory ledger"
  );

  let app = lostlink_server::app(AppState::new(ledger, credentials, parser));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
