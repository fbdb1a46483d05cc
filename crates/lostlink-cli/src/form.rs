//! Item field flags shared by `add` and `update`.

use clap::Args;
use lostlink_core::{
  intake::ItemDraft,
  item::{HandoverDetails, ItemStatus, OwnerDetails},
};

/// Manual item fields. Anything given here wins over a prefilled value.
#[derive(Args, Debug, Default, Clone)]
pub struct ItemArgs {
  /// Item name, e.g. "Dell XPS Laptop".
  #[arg(long)]
  pub item: Option<String>,

  #[arg(long)]
  pub location: Option<String>,

  /// Date as YYYY-MM-DD (default: today).
  #[arg(long)]
  pub date: Option<String>,

  /// pending, claimed or archived.
  #[arg(long)]
  pub status: Option<ItemStatus>,

  #[arg(long)]
  pub specification: Option<String>,

  /// Image URL; a placeholder is shown when unset.
  #[arg(long)]
  pub picture: Option<String>,

  #[arg(long)]
  pub owner_name: Option<String>,

  #[arg(long)]
  pub owner_register_number: Option<String>,

  #[arg(long)]
  pub owner_year: Option<String>,

  #[arg(long)]
  pub owner_dept: Option<String>,

  /// Staff member who handed the item over.
  #[arg(long)]
  pub handover_name: Option<String>,

  #[arg(long)]
  pub handover_faculty: Option<String>,

  #[arg(long)]
  pub handover_dept: Option<String>,

  #[arg(long)]
  pub handover_cabin_no: Option<String>,
}

fn set(target: &mut String, value: &Option<String>) {
  if let Some(v) = value {
    target.clone_from(v);
  }
}

impl ItemArgs {
  fn has_owner(&self) -> bool {
    self.owner_name.is_some()
      || self.owner_register_number.is_some()
      || self.owner_year.is_some()
      || self.owner_dept.is_some()
  }

  fn has_handover(&self) -> bool {
    self.handover_name.is_some()
      || self.handover_faculty.is_some()
      || self.handover_dept.is_some()
      || self.handover_cabin_no.is_some()
  }

  /// Overwrite the fields of `draft` that were given on the command line.
  pub fn apply(&self, draft: &mut ItemDraft) {
    set(&mut draft.item, &self.item);
    set(&mut draft.location, &self.location);
    set(&mut draft.date, &self.date);
    set(&mut draft.specification, &self.specification);
    if let Some(status) = self.status {
      draft.status = status;
    }
    if self.picture.is_some() {
      draft.item_picture.clone_from(&self.picture);
    }

    if self.has_owner() {
      let owner = draft.owner.get_or_insert_with(OwnerDetails::default);
      set(&mut owner.name, &self.owner_name);
      set(&mut owner.register_number, &self.owner_register_number);
      set(&mut owner.year, &self.owner_year);
      set(&mut owner.dept, &self.owner_dept);
    }

    if self.has_handover() {
      let handover = draft.handover.get_or_insert_with(HandoverDetails::default);
      set(&mut handover.name, &self.handover_name);
      set(&mut handover.faculty, &self.handover_faculty);
      set(&mut handover.dept, &self.handover_dept);
      set(&mut handover.cabin_no, &self.handover_cabin_no);
    }
  }
}
