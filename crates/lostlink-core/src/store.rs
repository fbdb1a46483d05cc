//! [`ItemStore`]: one ordered, in-memory collection of items.
//!
//! Items are kept most-recent-first. The store never validates field content;
//! that is the job of [`crate::intake`]. Mutations that target an id the store
//! does not hold leave the collection untouched and report the miss through
//! their return value.

use chrono::Utc;

use crate::{
  Error, Result,
  item::{Item, ItemFields, ItemId},
};

/// An ordered collection of items with per-collection unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
  items:   Vec<Item>,
  last_id: ItemId,
}

impl ItemStore {
  pub fn new() -> Self { Self::default() }

  /// Build a store from existing records, kept in the given order.
  ///
  /// Fails if two records share an id.
  pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
    let mut store = Self::new();
    for item in items {
      store.push_existing(item)?;
    }
    Ok(store)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// All items in collection order.
  pub fn items(&self) -> &[Item] { &self.items }

  pub fn iter(&self) -> impl Iterator<Item = &Item> { self.items.iter() }

  pub fn get(&self, id: ItemId) -> Option<&Item> {
    self.items.iter().find(|i| i.id == id)
  }

  pub fn contains(&self, id: ItemId) -> bool { self.get(id).is_some() }

  /// Items whose name or location contains `query`, ignoring case, in
  /// collection order. An empty query matches everything.
  pub fn search(&self, query: &str) -> Vec<&Item> {
    let needle = query.to_lowercase();
    self
      .items
      .iter()
      .filter(|i| {
        i.fields.item.to_lowercase().contains(&needle)
          || i.fields.location.to_lowercase().contains(&needle)
      })
      .collect()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Insert a new item at the front and return it.
  ///
  /// Fails with [`Error::IdsExhausted`] once the store holds `ItemId::MAX`.
  pub fn add(&mut self, fields: ItemFields) -> Result<Item> {
    let item = Item::new(self.next_id()?, fields);
    self.last_id = item.id;
    self.items.insert(0, item.clone());
    Ok(item)
  }

  /// Replace every field of item `id`. Returns `None`, changing nothing, when
  /// no such item exists.
  pub fn update(&mut self, id: ItemId, fields: ItemFields) -> Option<Item> {
    let slot = self.items.iter_mut().find(|i| i.id == id)?;
    slot.fields = fields;
    Some(slot.clone())
  }

  /// Remove item `id`. Returns the removed record, or `None` when absent.
  pub fn delete(&mut self, id: ItemId) -> Option<Item> {
    let pos = self.items.iter().position(|i| i.id == id)?;
    Some(self.items.remove(pos))
  }

  /// Append a record that already carries an id, e.g. seeded sample data.
  pub fn push_existing(&mut self, item: Item) -> Result<()> {
    if self.contains(item.id) {
      return Err(Error::DuplicateId(item.id));
    }
    self.last_id = self.last_id.max(item.id);
    self.items.push(item);
    Ok(())
  }

  /// Time-derived and strictly increasing: the current Unix time in
  /// milliseconds, bumped past anything this store has already handed out or
  /// been seeded with.
  fn next_id(&self) -> Result<ItemId> {
    let floor = self.last_id.checked_add(1).ok_or(Error::IdsExhausted)?;
    Ok(Utc::now().timestamp_millis().max(floor))
  }
}
