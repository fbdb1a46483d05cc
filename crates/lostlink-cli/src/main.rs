//! `lostlink`: command-line client for the LostLink lost-and-found server.
//!
//! # Usage
//!
//! ```
//! lostlink --url http://localhost:8080 --email desk@campus.edu --password secret login
//! lostlink --config ~/.config/lostlink/config.toml list lost --query laptop
//! lostlink add found --describe "black umbrella near block 3 this morning"
//! ```

mod client;
mod form;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use form::ItemArgs;
use lostlink_core::{
  export::EXPORT_FILE_NAME,
  intake::{self, ItemDraft},
  item::{ItemId, ItemKind},
  settings::NotificationSettings,
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "lostlink", about = "Command-line client for the LostLink server")]
struct Args {
  /// Path to a TOML config file (url, email, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the LostLink server (default: http://localhost:8080).
  #[arg(long, env = "LOSTLINK_URL")]
  url: Option<String>,

  /// Admin email.
  #[arg(long, env = "LOSTLINK_EMAIL")]
  email: Option<String>,

  /// Admin password (plaintext).
  #[arg(long, env = "LOSTLINK_PASSWORD")]
  password: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Register the admin account (first run) or check the credentials.
  Login,

  /// List lost or found items, optionally filtered.
  List {
    kind:  ItemKind,
    /// Case-insensitive text matched against item name or location.
    #[arg(short, long)]
    query: Option<String>,
  },

  /// Show every field of one item.
  Show { kind: ItemKind, id: ItemId },

  /// Report a new lost or found item.
  Add {
    kind:     ItemKind,
    /// Free-text description used to prefill the fields.
    #[arg(long)]
    describe: Option<String>,
    #[command(flatten)]
    fields:   ItemArgs,
  },

  /// Change an existing item; unspecified fields keep their stored values.
  Update {
    kind:     ItemKind,
    id:       ItemId,
    #[arg(long)]
    describe: Option<String>,
    #[command(flatten)]
    fields:   ItemArgs,
  },

  /// Delete an item.
  Delete { kind: ItemKind, id: ItemId },

  /// Show what smart entry makes of a description, without saving.
  Parse { text: String },

  /// Pending lost/found pairs that may be the same object.
  Matches,

  /// Headline totals and potential matches.
  Dashboard,

  /// Item counts by location and by status.
  Report,

  /// Download every item as CSV.
  Export {
    /// Where to write the file.
    #[arg(short, long, default_value = EXPORT_FILE_NAME)]
    output: PathBuf,
  },

  /// Claimed items and who handed them over.
  Handovers {
    #[arg(short, long)]
    query: Option<String>,
  },

  /// Email notification settings.
  #[command(subcommand)]
  Settings(SettingsCommand),
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
  /// Print the current settings (password hidden).
  Show,
  /// Replace the settings.
  Set {
    #[arg(long)]
    enabled:       bool,
    #[arg(long)]
    sender_email:  String,
    #[arg(long)]
    smtp_password: String,
    #[arg(long)]
    smtp_server:   String,
    #[arg(long, default_value = "587")]
    smtp_port:     String,
  },
  /// Simulate sending a test email.
  Test,
}

// ─── Config file ─────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  email:    String,
  #[serde(default)]
  password: String,
}

fn non_empty(s: &str) -> Option<String> { (!s.is_empty()).then(|| s.to_owned()) }

/// CLI flags override the config file, which overrides defaults.
fn resolve_config(args: &Args, file: &ConfigFile) -> ApiConfig {
  ApiConfig {
    base_url: args
      .url
      .clone()
      .or_else(|| non_empty(&file.url))
      .unwrap_or_else(|| DEFAULT_URL.to_owned()),
    email:    args
      .email
      .clone()
      .or_else(|| non_empty(&file.email))
      .unwrap_or_default(),
    password: args
      .password
      .clone()
      .or_else(|| non_empty(&file.password))
      .unwrap_or_default(),
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let client = ApiClient::new(resolve_config(&args, &file_cfg))?;
  run(&client, args.command).await
}

/// Seed `draft` from `describe` when given. A parser failure is reported and
/// the draft is kept, so manual fields still go through.
async fn prefill(client: &ApiClient, describe: Option<&str>, draft: ItemDraft) -> ItemDraft {
  let Some(text) = describe else { return draft };
  match client.parse(text, &draft).await {
    Ok(filled) => filled,
    Err(e) => {
      eprintln!("{e:#}");
      draft
    }
  }
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Login => {
      let resp = client.login().await?;
      if resp.registered {
        println!("Registered admin account {}.", resp.email);
      } else {
        println!("Signed in as {}.", resp.email);
      }
    }

    Command::List { kind, query } => {
      let items = client.list(kind, query.as_deref()).await?;
      println!("{}", output::items(&items));
    }

    Command::Show { kind, id } => {
      let item = client.get(kind, id).await?;
      println!("{}", output::item_detail(&item));
    }

    Command::Add { kind, describe, fields } => {
      let mut draft = prefill(client, describe.as_deref(), ItemDraft::new(intake::today())).await;
      fields.apply(&mut draft);
      if let Err(e) = draft.validate() {
        bail!("{e}");
      }
      let item = client.create(kind, &draft).await?;
      println!("Added {kind} item #{}.\n{}", item.id, output::item_detail(&item));
    }

    Command::Update { kind, id, describe, fields } => {
      let stored = client.get(kind, id).await?;
      let mut draft = prefill(client, describe.as_deref(), ItemDraft::from_item(&stored)).await;
      fields.apply(&mut draft);
      if let Err(e) = draft.validate() {
        bail!("{e}");
      }
      let item = client.update(kind, id, &draft).await?;
      println!("Updated {kind} item #{}.\n{}", item.id, output::item_detail(&item));
    }

    Command::Delete { kind, id } => {
      client.delete(kind, id).await?;
      println!("Deleted {kind} item #{id}.");
    }

    Command::Parse { text } => {
      let draft = client.parse(&text, &ItemDraft::new(intake::today())).await?;
      println!("{}", output::draft(&draft));
    }

    Command::Matches => {
      let pairs = client.matches().await?;
      println!("{}", output::matches(&pairs));
    }

    Command::Dashboard => {
      let dash = client.dashboard().await?;
      println!("{}\n\n{}", output::summary(&dash.summary), output::matches(&dash.matches));
    }

    Command::Report => {
      let locations = client.locations().await?;
      let statuses = client.statuses().await?;
      println!(
        "{}\n\n{}",
        output::tallies("By location", &locations),
        output::tallies("By status", &statuses)
      );
    }

    Command::Export { output } => {
      let csv = client.export_csv().await?;
      std::fs::write(&output, csv)
        .with_context(|| format!("writing {}", output.display()))?;
      println!("Wrote {}.", output.display());
    }

    Command::Handovers { query } => {
      let items = client.handovers(query.as_deref()).await?;
      println!("{}", output::handovers(&items));
    }

    Command::Settings(SettingsCommand::Show) => {
      println!("{}", output::settings(&client.settings().await?));
    }

    Command::Settings(SettingsCommand::Set {
      enabled,
      sender_email,
      smtp_password,
      smtp_server,
      smtp_port,
    }) => {
      let saved = client
        .put_settings(&NotificationSettings {
          enabled,
          sender_email,
          password: smtp_password,
          smtp_server,
          smtp_port,
        })
        .await?;
      println!("Settings saved.\n{}", output::settings(&saved));
    }

    Command::Settings(SettingsCommand::Test) => {
      println!("{}", client.send_test_email().await?.message);
    }
  }
  Ok(())
}
