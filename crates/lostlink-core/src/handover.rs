//! Claimed-item listing for the handover register.

use crate::{
  item::{Item, ItemStatus},
  ledger::Ledger,
};

/// Claimed items from both collections (lost first) whose name, owner name,
/// owner register number or handover staff name contains `query`, ignoring
/// case. An empty query returns every claimed item.
pub fn search_claimed<'a>(ledger: &'a Ledger, query: &str) -> Vec<&'a Item> {
  let needle = query.to_lowercase();
  let hit = |s: &str| s.to_lowercase().contains(&needle);

  ledger
    .all_items()
    .filter(|i| i.status() == ItemStatus::Claimed)
    .filter(|i| {
      let f = &i.fields;
      hit(&f.item)
        || f
          .owner
          .as_ref()
          .is_some_and(|o| hit(&o.name) || hit(&o.register_number))
        || f.handover.as_ref().is_some_and(|h| hit(&h.name))
    })
    .collect()
}
