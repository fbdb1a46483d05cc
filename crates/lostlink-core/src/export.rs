//! CSV export of every item in both collections.
//!
//! Layout: a bare header row, then one row per item (lost first, then found),
//! `\n`-terminated with the final terminator trimmed. Data rows quote every
//! non-numeric field and double embedded `"`; the id is written bare.

use std::collections::HashSet;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{
  Result,
  item::{Item, ItemKind},
  ledger::Ledger,
};

/// File name offered for the download.
pub const EXPORT_FILE_NAME: &str = "lost_and_found_report.csv";

pub const HEADER: [&str; 7] =
  ["ID", "Type", "Item", "Location", "Date", "Status", "Specification"];

/// Leading characters that spreadsheet applications treat as a formula.
const FORMULA_TRIGGERS: [char; 6] = ['=', '+', '-', '@', '\t', '\r'];

/// Prefix formula triggers with `'` so spreadsheets show the text verbatim.
fn guard(s: &str) -> String {
  if s.starts_with(FORMULA_TRIGGERS) {
    format!("'{s}")
  } else {
    s.to_owned()
  }
}

fn record(item: &Item, kind: ItemKind) -> [String; 7] {
  let f = &item.fields;
  [
    item.id.to_string(),
    kind.to_string(),
    guard(&f.item),
    guard(&f.location),
    f.date.to_string(),
    f.status.to_string(),
    guard(f.specification.as_deref().unwrap_or_default()),
  ]
}

/// Serialise the whole ledger.
///
/// The `Type` column is derived from membership of the row's id in the lost
/// collection, so a found item whose id also exists among lost items is
/// labelled `Lost`.
pub fn to_csv(ledger: &Ledger) -> Result<String> {
  let lost_ids: HashSet<_> = ledger.lost().iter().map(|i| i.id).collect();
  let mut buf = Vec::new();

  let mut header = WriterBuilder::new()
    .terminator(Terminator::Any(b'\n'))
    .from_writer(&mut buf);
  header.write_record(HEADER)?;
  header.flush().map_err(csv::Error::from)?;
  drop(header);

  let mut rows = WriterBuilder::new()
    .quote_style(QuoteStyle::NonNumeric)
    .terminator(Terminator::Any(b'\n'))
    .from_writer(&mut buf);
  for item in ledger.all_items() {
    let kind = if lost_ids.contains(&item.id) {
      ItemKind::Lost
    } else {
      ItemKind::Found
    };
    rows.write_record(record(item, kind))?;
  }
  rows.flush().map_err(csv::Error::from)?;
  drop(rows);

  if buf.last() == Some(&b'\n') {
    buf.pop();
  }
  Ok(String::from_utf8_lossy(&buf).into_owned())
}
