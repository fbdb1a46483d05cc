//! The [`Ledger`]: sole owner of the lost and found collections.
//!
//! Everything derived from the two collections (matches, reports, handover
//! listings) is computed by free functions over `&Ledger`, never cached here.

use crate::{
  Result,
  item::{Item, ItemKind},
  store::ItemStore,
};

/// Application state for one operator session: two independent collections
/// of identically-shaped items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
  lost:  ItemStore,
  found: ItemStore,
}

impl Ledger {
  pub fn new() -> Self { Self::default() }

  /// Build a ledger from pre-existing records, kept in the given order.
  pub fn from_items(
    lost: impl IntoIterator<Item = Item>,
    found: impl IntoIterator<Item = Item>,
  ) -> Result<Self> {
    Ok(Self {
      lost:  ItemStore::from_items(lost)?,
      found: ItemStore::from_items(found)?,
    })
  }

  pub fn lost(&self) -> &ItemStore { &self.lost }

  pub fn found(&self) -> &ItemStore { &self.found }

  pub fn collection(&self, kind: ItemKind) -> &ItemStore {
    match kind {
      ItemKind::Lost => &self.lost,
      ItemKind::Found => &self.found,
    }
  }

  pub fn collection_mut(&mut self, kind: ItemKind) -> &mut ItemStore {
    match kind {
      ItemKind::Lost => &mut self.lost,
      ItemKind::Found => &mut self.found,
    }
  }

  /// Lost items followed by found items, each in collection order.
  pub fn all_items(&self) -> impl Iterator<Item = &Item> {
    self.lost.iter().chain(self.found.iter())
  }
}
