//! The [`ItemParser`] seam: turning a free-text description into item
//! fields via an external text-understanding service.

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Best-effort structured guess returned by an [`ItemParser`].
///
/// All four fields are required on the wire; `date` is `YYYY-MM-DD` but is
/// kept as text because it is only ever used to seed a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedItem {
  pub item:          String,
  pub location:      String,
  pub date:          String,
  pub specification: String,
}

/// Abstraction over the external description parser.
///
/// Implementations must resolve relative dates ("yesterday", "Tuesday")
/// against `today`.
pub trait ItemParser: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn parse_description<'a>(
    &'a self,
    description: &'a str,
    today: NaiveDate,
  ) -> impl Future<Output = Result<ParsedItem, Self::Error>> + Send + 'a;
}
