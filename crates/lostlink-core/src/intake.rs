//! Item form intake: the editable draft behind "add" and "edit", its
//! validation, and the optional AI-assisted prefill.
//!
//! A draft is plain text until it is validated into [`ItemFields`]. The parser
//! only ever seeds a draft; nothing it returns reaches a store without going
//! through [`ItemDraft::validate`].

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
  Error, Result,
  item::{HandoverDetails, Item, ItemFields, ItemId, ItemStatus, OwnerDetails},
  parser::{ItemParser, ParsedItem},
  store::ItemStore,
};

/// Today's date as used for form defaults and relative-date resolution.
pub fn today() -> NaiveDate { Utc::now().date_naive() }

fn today_string() -> String { today().to_string() }

/// The manual-entry form. Every text field may be empty or malformed until
/// [`validate`](Self::validate) is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
  #[serde(default)]
  pub item:          String,
  #[serde(default)]
  pub location:      String,
  #[serde(default = "today_string")]
  pub date:          String,
  #[serde(default)]
  pub status:        ItemStatus,
  #[serde(default)]
  pub specification: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub item_picture:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub owner:         Option<OwnerDetails>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub handover:      Option<HandoverDetails>,
}

impl Default for ItemDraft {
  fn default() -> Self { Self::new(today()) }
}

impl ItemDraft {
  /// A blank form dated `today` with status Pending.
  pub fn new(today: NaiveDate) -> Self {
    Self {
      item:          String::new(),
      location:      String::new(),
      date:          today.to_string(),
      status:        ItemStatus::Pending,
      specification: String::new(),
      item_picture:  None,
      owner:         None,
      handover:      None,
    }
  }

  /// A form pre-populated from a stored item, for editing.
  pub fn from_item(item: &Item) -> Self {
    let f = &item.fields;
    Self {
      item:          f.item.clone(),
      location:      f.location.clone(),
      date:          f.date.to_string(),
      status:        f.status,
      specification: f.specification.clone().unwrap_or_default(),
      item_picture:  f.item_picture.clone(),
      owner:         f.owner.clone(),
      handover:      f.handover.clone(),
    }
  }

  /// Check required fields and convert to [`ItemFields`].
  ///
  /// `item`, `location` and `date` must be non-blank and `date` must be
  /// `YYYY-MM-DD`. Name and location are trimmed; a blank specification or
  /// picture becomes `None`.
  pub fn validate(&self) -> Result<ItemFields> {
    let item = required("item", &self.item)?;
    let location = required("location", &self.location)?;
    let date_text = required("date", &self.date)?;
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
      .map_err(|_| Error::InvalidDate(date_text.to_owned()))?;

    Ok(ItemFields {
      item: item.to_owned(),
      location: location.to_owned(),
      date,
      status: self.status,
      specification: non_blank(&self.specification),
      item_picture: self.item_picture.as_deref().and_then(non_blank),
      owner: self.owner.clone(),
      handover: self.handover.clone(),
    })
  }

  /// Overwrite the parser-provided fields with a parse result. An empty date
  /// falls back to `today`; status and claim detail are left alone.
  pub fn apply_parsed(&mut self, parsed: ParsedItem, today: NaiveDate) {
    self.item = parsed.item;
    self.location = parsed.location;
    self.date = if parsed.date.trim().is_empty() {
      today.to_string()
    } else {
      parsed.date
    };
    self.specification = parsed.specification;
  }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    Err(Error::MissingField(field))
  } else {
    Ok(trimmed)
  }
}

fn non_blank(value: &str) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// ─── Smart entry ─────────────────────────────────────────────────────────────

/// Ask `parser` to interpret `description` and, on success, seed `draft` with
/// the result.
///
/// On any failure `draft` is left exactly as it was and the error carries the
/// user-facing advisory; manual entry stays usable.
pub async fn prefill<P: ItemParser>(
  parser: &P,
  description: &str,
  draft: &mut ItemDraft,
  today: NaiveDate,
) -> Result<()> {
  if description.trim().is_empty() {
    return Err(Error::EmptyDescription);
  }

  match parser.parse_description(description, today).await {
    Ok(parsed) => {
      draft.apply_parsed(parsed, today);
      Ok(())
    }
    Err(e) => {
      warn!(error = %e, "item description parsing failed");
      Err(Error::ParseFailed(Box::new(e)))
    }
  }
}

// ─── Saving ──────────────────────────────────────────────────────────────────

/// Validate `draft` and add it to `store`.
pub fn submit_new(store: &mut ItemStore, draft: &ItemDraft) -> Result<Item> {
  let fields = draft.validate()?;
  store.add(fields)
}

/// Validate `draft` and replace item `id` with it. `Ok(None)` means the item
/// no longer exists and nothing was changed.
pub fn submit_edit(
  store: &mut ItemStore,
  id: ItemId,
  draft: &ItemDraft,
) -> Result<Option<Item>> {
  let fields = draft.validate()?;
  Ok(store.update(id, fields))
}
