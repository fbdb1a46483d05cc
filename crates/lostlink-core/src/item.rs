//! Item records: the single shape shared by lost and found reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Identifier of an item. Unique within its own collection only.
pub type ItemId = i64;

/// Base URL of the placeholder image service used when an item has no
/// picture of its own.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Where an item currently stands. Exactly one variant holds at a time and
/// nothing transitions automatically.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ItemStatus {
  #[default]
  Pending,
  Claimed,
  Archived,
}

/// Which collection a report lives in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ItemKind {
  Lost,
  Found,
}

// ─── Claim detail ────────────────────────────────────────────────────────────

/// The person an item was returned to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetails {
  pub register_number: String,
  pub year:            String,
  pub dept:            String,
  pub name:            String,
}

/// The staff member who handed the item over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoverDetails {
  pub name:     String,
  pub faculty:  String,
  pub dept:     String,
  pub cabin_no: String,
}

// ─── Item ────────────────────────────────────────────────────────────────────

/// Every field of an item except its id. This is what the store accepts on
/// `add` and `update`; the id is always owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
  pub item:          String,
  pub location:      String,
  pub date:          NaiveDate,
  #[serde(default)]
  pub status:        ItemStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub specification: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub item_picture:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub owner:         Option<OwnerDetails>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub handover:      Option<HandoverDetails>,
}

impl ItemFields {
  /// Fields with only the required values set and everything else defaulted.
  pub fn new(
    item: impl Into<String>,
    location: impl Into<String>,
    date: NaiveDate,
  ) -> Self {
    Self {
      item: item.into(),
      location: location.into(),
      date,
      status: ItemStatus::default(),
      specification: None,
      item_picture: None,
      owner: None,
      handover: None,
    }
  }
}

/// A stored lost or found report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id:     ItemId,
  #[serde(flatten)]
  pub fields: ItemFields,
}

impl Item {
  pub fn new(id: ItemId, fields: ItemFields) -> Self { Self { id, fields } }

  pub fn name(&self) -> &str { &self.fields.item }

  pub fn location(&self) -> &str { &self.fields.location }

  pub fn status(&self) -> ItemStatus { self.fields.status }

  pub fn is_pending(&self) -> bool { self.fields.status == ItemStatus::Pending }

  /// The item's own picture, or a placeholder keyed by its id.
  pub fn picture_url(&self) -> String {
    match &self.fields.item_picture {
      Some(url) if !url.trim().is_empty() => url.clone(),
      _ => placeholder_picture_url(self.id),
    }
  }
}

/// Deterministic placeholder image for an item id.
pub fn placeholder_picture_url(id: ItemId) -> String {
  format!("{PLACEHOLDER_IMAGE_BASE}/{id}/200/200")
}
