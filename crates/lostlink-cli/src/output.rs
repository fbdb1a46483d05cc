//! Plain-text rendering for command output.

use std::fmt::Write as _;

use lostlink_core::{
  intake::ItemDraft,
  item::Item,
  report::{Summary, Tally},
  settings::NotificationSettings,
};

use crate::client::MatchPair;

/// One line per item: id, status, name, location, date.
pub fn item_row(item: &Item) -> String {
  format!(
    "{:>14}  {:<8}  {:<28}  {:<24}  {}",
    item.id,
    item.status().as_ref(),
    item.name(),
    item.location(),
    item.fields.date
  )
}

pub fn items(items: &[Item]) -> String {
  if items.is_empty() {
    return "No items.".to_owned();
  }
  items.iter().map(item_row).collect::<Vec<_>>().join("\n")
}

/// Every field of one item, one per line.
pub fn item_detail(item: &Item) -> String {
  let f = &item.fields;
  let mut out = String::new();
  let _ = writeln!(out, "ID:            {}", item.id);
  let _ = writeln!(out, "Item:          {}", f.item);
  let _ = writeln!(out, "Location:      {}", f.location);
  let _ = writeln!(out, "Date:          {}", f.date);
  let _ = writeln!(out, "Status:        {}", f.status);
  let _ = writeln!(out, "Specification: {}", f.specification.as_deref().unwrap_or("-"));
  let _ = write!(out, "Picture:       {}", item.picture_url());
  if let Some(o) = &f.owner {
    let _ = write!(
      out,
      "\nOwner:         {} ({}, {} {})",
      o.name, o.register_number, o.year, o.dept
    );
  }
  if let Some(h) = &f.handover {
    let _ = write!(
      out,
      "\nHanded over:   {} ({}, {}, cabin {})",
      h.name, h.faculty, h.dept, h.cabin_no
    );
  }
  out
}

pub fn draft(d: &ItemDraft) -> String {
  format!(
    "Item:          {}\nLocation:      {}\nDate:          {}\nStatus:        {}\nSpecification: {}",
    d.item, d.location, d.date, d.status, d.specification
  )
}

pub fn matches(pairs: &[MatchPair]) -> String {
  if pairs.is_empty() {
    return "No potential matches.".to_owned();
  }
  pairs
    .iter()
    .map(|m| {
      format!(
        "lost #{} \"{}\"  <->  found #{} \"{}\"  @ {}",
        m.lost.id,
        m.lost.name(),
        m.found.id,
        m.found.name(),
        m.found.location()
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn summary(s: &Summary) -> String {
  format!(
    "Lost:    {}\nFound:   {}\nClaimed: {}\nPending: {}",
    s.total_lost, s.total_found, s.total_claimed, s.total_pending
  )
}

pub fn tallies(title: &str, rows: &[Tally]) -> String {
  let width = rows.iter().map(|t| t.name.len()).max().unwrap_or(0);
  let mut out = format!("{title}:");
  for t in rows {
    let _ = write!(out, "\n  {:<width$}  {}", t.name, t.count);
  }
  out
}

pub fn handovers(items: &[Item]) -> String {
  if items.is_empty() {
    return "No handovers.".to_owned();
  }
  items
    .iter()
    .map(|i| {
      let owner = i.fields.owner.as_ref().map_or("-", |o| o.name.as_str());
      let staff = i.fields.handover.as_ref().map_or("-", |h| h.name.as_str());
      format!("{:>14}  {:<28}  owner: {:<20}  handed over by: {}", i.id, i.name(), owner, staff)
    })
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn settings(s: &NotificationSettings) -> String {
  format!(
    "Enabled:      {}\nSender email: {}\nSMTP server:  {}\nSMTP port:    {}",
    s.enabled, s.sender_email, s.smtp_server, s.smtp_port
  )
}
