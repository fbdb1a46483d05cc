//! Error types for `lostlink-core`.

use thiserror::Error;

use crate::item::ItemId;

/// Advisory shown whenever the free-text parser cannot help.
pub const PARSE_FAILED_MESSAGE: &str =
  "Failed to understand the item description. Please try entering the details manually.";

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("invalid date {0:?}, expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("an item with id {0} already exists in this collection")]
  DuplicateId(ItemId),

  #[error("no item ids left in this collection")]
  IdsExhausted,

  #[error("Invalid email or password.")]
  InvalidCredentials,

  #[error("Please provide a valid email and password to register.")]
  IncompleteRegistration,

  #[error("credential store error: {0}")]
  CredentialStore(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("a description is required for smart entry")]
  EmptyDescription,

  /// The external parser failed; the display text is the user-facing advisory
  /// and the underlying failure is kept as the source.
  #[error("{}", PARSE_FAILED_MESSAGE)]
  ParseFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("Please fill in all email fields before sending a test.")]
  IncompleteMailSettings,

  #[error("CSV export failed: {0}")]
  Export(#[from] csv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
