//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use chrono::NaiveDate;
use lostlink_core::parser::{ItemParser, ParsedItem};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
  Error, Result,
  types::{GenerateRequest, GenerateResponse},
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }

fn default_model() -> String { DEFAULT_MODEL.to_owned() }

/// Connection settings, usually the `[gemini]` table of the server config.
#[derive(Clone, Deserialize)]
pub struct GeminiConfig {
  /// Without a key every parse fails with [`Error::NotConfigured`].
  #[serde(default)]
  pub api_key:      Option<String>,
  #[serde(default = "default_model")]
  pub model:        String,
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  /// Per-request timeout. Unset means requests may wait indefinitely.
  #[serde(default)]
  pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      api_key:      None,
      model:        default_model(),
      base_url:     default_base_url(),
      timeout_secs: None,
    }
  }
}

impl std::fmt::Debug for GeminiConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GeminiConfig")
      .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
      .field("model", &self.model)
      .field("base_url", &self.base_url)
      .field("timeout_secs", &self.timeout_secs)
      .finish()
  }
}

/// Parses item descriptions with Gemini.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct GeminiParser {
  client: Client,
  config: GeminiConfig,
}

impl GeminiParser {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;
    Ok(Self { client, config })
  }

  pub fn is_configured(&self) -> bool { self.config.api_key.is_some() }

  fn url(&self) -> String {
    format!(
      "{}/v1beta/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }

  async fn generate(&self, description: &str, today: NaiveDate) -> Result<ParsedItem> {
    let api_key = self.config.api_key.as_deref().ok_or(Error::NotConfigured)?;
    let request = GenerateRequest::structured(prompt(description, today));

    let resp = self
      .client
      .post(self.url())
      .header("x-goog-api-key", api_key)
      .json(&request)
      .send()
      .await?;

    let status = resp.status();
    debug!(status = %status, model = %self.config.model, "generateContent response received");
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Status { status, body });
    }

    let body: GenerateResponse = resp.json().await?;
    let text = body.text().ok_or(Error::EmptyResponse)?;
    Ok(serde_json::from_str(&text)?)
  }
}

/// The instruction sent alongside the user's description.
fn prompt(description: &str, today: NaiveDate) -> String {
  format!(
    "Parse the following description of a lost or found item and extract the details. \
     Today's date is {today}. If a specific date is mentioned (e.g., 'yesterday', 'Tuesday'), \
     calculate the YYYY-MM-DD date. If no date is found, use today's date in YYYY-MM-DD format. \
     Description: \"{description}\""
  )
}

impl ItemParser for GeminiParser {
  type Error = Error;

  async fn parse_description(&self, description: &str, today: NaiveDate) -> Result<ParsedItem> {
    self.generate(description, today).await
  }
}
