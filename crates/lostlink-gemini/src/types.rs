//! Request and response bodies for `models/{model}:generateContent`.
//!
//! Only the fields this crate reads or writes are modelled.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// ─── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
  pub contents:          Vec<Content>,
  pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:  Option<String>,
  #[serde(default)]
  pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
  #[serde(default)]
  pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
  pub response_mime_type: String,
  pub response_schema:    Value,
}

impl GenerateRequest {
  /// A single-turn request asking for JSON shaped like `ParsedItem`.
  pub fn structured(prompt: String) -> Self {
    Self {
      contents:          vec![Content {
        role:  Some("user".into()),
        parts: vec![Part { text: Some(prompt) }],
      }],
      generation_config: GenerationConfig {
        response_mime_type: "application/json".into(),
        response_schema:    parsed_item_schema(),
      },
    }
  }
}

/// OpenAPI-subset schema for the four required string fields.
fn parsed_item_schema() -> Value {
  json!({
    "type": "OBJECT",
    "properties": {
      "item": {
        "type": "STRING",
        "description": "The name of the item (e.g., 'iPhone 14', 'water bottle')."
      },
      "location": {
        "type": "STRING",
        "description": "The location where the item was lost or found (e.g., 'Library', 'Food Court')."
      },
      "date": {
        "type": "STRING",
        "description": "The date the item was lost or found in YYYY-MM-DD format."
      },
      "specification": {
        "type": "STRING",
        "description": "Detailed specifications or description of the item (e.g., 'blue color, with a cat sticker')."
      }
    },
    "required": ["item", "location", "date", "specification"]
  })
}

// ─── Response ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
  #[serde(default)]
  pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
  pub content: Option<Content>,
}

impl GenerateResponse {
  /// Concatenated text of the first candidate, if it has any.
  pub fn text(&self) -> Option<String> {
    let content = self.candidates.first()?.content.as_ref()?;
    let text: String = content
      .parts
      .iter()
      .filter_map(|p| p.text.as_deref())
      .collect();
    (!text.trim().is_empty()).then_some(text)
  }
}
