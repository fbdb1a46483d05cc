//! Aggregate views over both collections: dashboard totals and the per-location
//! and per-status tallies behind the report charts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
  item::{Item, ItemStatus},
  ledger::Ledger,
};

/// One bar/slice of a categorical chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
  pub name:  String,
  pub count: usize,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  pub total_lost:    usize,
  pub total_found:   usize,
  pub total_claimed: usize,
  pub total_pending: usize,
}

/// Count `items` by `key`, listing keys in the order they are first seen.
fn tally<'a, I, F>(items: I, key: F) -> Vec<Tally>
where
  I: IntoIterator<Item = &'a Item>,
  F: Fn(&'a Item) -> &'a str,
{
  let mut index: HashMap<&str, usize> = HashMap::new();
  let mut out: Vec<Tally> = Vec::new();
  for item in items {
    let name = key(item);
    match index.get(name) {
      Some(&pos) => out[pos].count += 1,
      None => {
        index.insert(name, out.len());
        out.push(Tally { name: name.to_owned(), count: 1 });
      }
    }
  }
  out
}

/// Item counts per location over lost then found items.
pub fn by_location(ledger: &Ledger) -> Vec<Tally> {
  tally(ledger.all_items(), |i| i.location())
}

/// Item counts per status over lost then found items.
pub fn by_status(ledger: &Ledger) -> Vec<Tally> {
  tally(ledger.all_items(), |i| i.fields.status.as_ref())
}

pub fn summary(ledger: &Ledger) -> Summary {
  let count = |status: ItemStatus| {
    ledger
      .all_items()
      .filter(|i| i.status() == status)
      .count()
  };
  Summary {
    total_lost:    ledger.lost().len(),
    total_found:   ledger.found().len(),
    total_claimed: count(ItemStatus::Claimed),
    total_pending: count(ItemStatus::Pending),
  }
}
