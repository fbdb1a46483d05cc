//! Potential-match detection between lost and found reports.
//!
//! A pair is proposed when both items are Pending, one item name contains the
//! other (ignoring case), and the locations are byte-for-byte equal. Every
//! qualifying pair is returned; nothing is ranked or deduplicated.

use serde::Serialize;

use crate::{item::Item, ledger::Ledger};

/// One lost report paired with one found report that may describe the same
/// object. Borrowed from the collections it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PotentialMatch<'a> {
  pub lost:  &'a Item,
  pub found: &'a Item,
}

/// The match predicate, ignoring status.
pub fn is_match(lost: &Item, found: &Item) -> bool {
  if lost.location() != found.location() {
    return false;
  }
  let a = lost.name().to_lowercase();
  let b = found.name().to_lowercase();
  a.contains(&b) || b.contains(&a)
}

/// All Pending×Pending pairs satisfying [`is_match`], in lost-collection
/// order and then found-collection order.
pub fn find_matches<'a>(lost: &'a [Item], found: &'a [Item]) -> Vec<PotentialMatch<'a>> {
  let pending_found: Vec<&Item> = found.iter().filter(|f| f.is_pending()).collect();

  lost
    .iter()
    .filter(|l| l.is_pending())
    .flat_map(|l| {
      pending_found
        .iter()
        .filter(move |f| is_match(l, f))
        .map(move |f| PotentialMatch { lost: l, found: *f })
    })
    .collect()
}

/// [`find_matches`] over both collections of a ledger.
pub fn ledger_matches(ledger: &Ledger) -> Vec<PotentialMatch<'_>> {
  find_matches(ledger.lost().items(), ledger.found().items())
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::item::{ItemFields, ItemStatus};

  fn item(id: i64, name: &str, location: &str, status: ItemStatus) -> Item {
    let mut fields = ItemFields::new(
      name,
      location,
      NaiveDate::from_ymd_opt(2023, 10, 28).unwrap(),
    );
    fields.status = status;
    Item::new(id, fields)
  }

  fn ids(matches: &[PotentialMatch<'_>]) -> Vec<(i64, i64)> {
    matches.iter().map(|m| (m.lost.id, m.found.id)).collect()
  }

  #[test]
  fn identical_pending_reports_match() {
    let lost = [item(2, "Dell XPS Laptop", "Amriteshwari Hall", ItemStatus::Pending)];
    let found = [item(102, "Dell XPS Laptop", "Amriteshwari Hall", ItemStatus::Pending)];
    assert_eq!(ids(&find_matches(&lost, &found)), [(2, 102)]);
  }

  #[test]
  fn leaving_pending_removes_the_pair() {
    let mut ledger = Ledger::from_items(
      [item(2, "Dell XPS Laptop", "Amriteshwari Hall", ItemStatus::Pending)],
      [item(102, "Dell XPS Laptop", "Amriteshwari Hall", ItemStatus::Pending)],
    )
    .unwrap();
    assert_eq!(ids(&ledger_matches(&ledger)), [(2, 102)]);

    let mut claimed = ledger.found().get(102).unwrap().fields.clone();
    claimed.status = ItemStatus::Claimed;
    ledger
      .collection_mut(crate::item::ItemKind::Found)
      .update(102, claimed);
    assert!(ledger_matches(&ledger).is_empty());

    let mut archived = ledger.lost().get(2).unwrap().fields.clone();
    archived.status = ItemStatus::Archived;
    ledger
      .collection_mut(crate::item::ItemKind::Lost)
      .update(2, archived);
    assert!(ledger_matches(&ledger).is_empty());
  }

  #[test]
  fn substring_in_either_direction_ignoring_case() {
    let lost = [item(1, "laptop", "Library", ItemStatus::Pending)];
    let found = [
      item(101, "Dell XPS LAPTOP", "Library", ItemStatus::Pending),
      item(102, "Lap", "Library", ItemStatus::Pending),
      item(103, "Tablet", "Library", ItemStatus::Pending),
    ];
    assert_eq!(ids(&find_matches(&lost, &found)), [(1, 101), (1, 102)]);
  }

  #[test]
  fn location_must_match_exactly() {
    let lost = [item(1, "Keys", "Food Court", ItemStatus::Pending)];
    let found = [
      item(101, "Keys", "Central Food Court", ItemStatus::Pending),
      item(102, "Keys", "food court", ItemStatus::Pending),
      item(103, "Keys", "Food Court ", ItemStatus::Pending),
    ];
    assert!(find_matches(&lost, &found).is_empty());
  }

  #[test]
  fn one_item_may_appear_in_several_pairs() {
    let lost = [
      item(1, "Water Bottle", "Gym", ItemStatus::Pending),
      item(2, "Bottle", "Gym", ItemStatus::Pending),
    ];
    let found = [
      item(101, "Bottle", "Gym", ItemStatus::Pending),
      item(102, "Steel Water Bottle", "Gym", ItemStatus::Pending),
    ];
    assert_eq!(
      ids(&find_matches(&lost, &found)),
      [(1, 101), (1, 102), (2, 101), (2, 102)]
    );
  }

  #[test]
  fn serializes_both_sides() {
    let lost = [item(2, "Keys", "Gym", ItemStatus::Pending)];
    let found = [item(102, "Keys", "Gym", ItemStatus::Pending)];
    let json = serde_json::to_value(find_matches(&lost, &found)).unwrap();
    assert_eq!(json[0]["lost"]["id"], 2);
    assert_eq!(json[0]["found"]["id"], 102);
  }
}
