//! Demo records used to seed a fresh server and as test fixtures.

use chrono::NaiveDate;

use crate::{
  item::{HandoverDetails, Item, ItemFields, ItemId, ItemStatus, OwnerDetails},
  ledger::Ledger,
};

fn record(
  id: ItemId,
  item: &str,
  location: &str,
  (y, m, d): (i32, u32, u32),
  status: ItemStatus,
  specification: &str,
  picture_seed: &str,
) -> Item {
  let date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
  let mut fields = ItemFields::new(item, location, date);
  fields.status = status;
  fields.specification = Some(specification.to_owned());
  fields.item_picture = Some(format!("https://picsum.photos/seed/{picture_seed}/200/200"));
  Item::new(id, fields)
}

pub fn lost_items() -> Vec<Item> {
  let mut iphone = record(
    1,
    "iPhone 14 Pro",
    "Library",
    (2023, 10, 26),
    ItemStatus::Claimed,
    "Deep Purple, small crack on the back",
    "iphone",
  );
  iphone.fields.owner = Some(OwnerDetails {
    register_number: "CB.EN.U4CSE20123".into(),
    year:            "3rd".into(),
    dept:            "CSE".into(),
    name:            "John Doe".into(),
  });
  iphone.fields.handover = Some(HandoverDetails {
    name:     "Admin".into(),
    faculty:  "Librarian".into(),
    dept:     "Library".into(),
    cabin_no: "A-101".into(),
  });

  vec![
    iphone,
    record(
      2,
      "Dell XPS Laptop",
      "Amriteshwari Hall",
      (2023, 10, 28),
      ItemStatus::Pending,
      "Silver color, with a sticker of a cat",
      "laptop",
    ),
    record(
      3,
      "Water Bottle",
      "Basketball Court",
      (2023, 11, 1),
      ItemStatus::Pending,
      "Hydro Flask, black, 32oz",
      "bottle",
    ),
    record(
      4,
      "Keys",
      "Food Court",
      (2023, 11, 2),
      ItemStatus::Archived,
      "A bunch of 3 keys with a car remote",
      "keys",
    ),
    record(
      5,
      "Airpods Pro",
      "Gym",
      (2023, 11, 5),
      ItemStatus::Pending,
      "White case with a few scratches",
      "airpods",
    ),
  ]
}

pub fn found_items() -> Vec<Item> {
  let mut id_card = record(
    103,
    "ID Card",
    "Main Gate",
    (2023, 11, 3),
    ItemStatus::Claimed,
    "Student ID card for Jane Smith",
    "idcard",
  );
  id_card.fields.owner = Some(OwnerDetails {
    register_number: "CB.EN.U4CSE20456".into(),
    year:            "2nd".into(),
    dept:            "EEE".into(),
    name:            "Jane Smith".into(),
  });
  id_card.fields.handover = Some(HandoverDetails {
    name:     "Security".into(),
    faculty:  "Security Head".into(),
    dept:     "Security".into(),
    cabin_no: "Gate 1".into(),
  });

  vec![
    record(
      101,
      "Smart Watch",
      "Central Library",
      (2023, 10, 27),
      ItemStatus::Pending,
      "Apple Watch Series 8, Midnight color",
      "watch",
    ),
    record(
      102,
      "Dell XPS Laptop",
      "Amriteshwari Hall",
      (2023, 10, 29),
      ItemStatus::Pending,
      "A silver Dell laptop was found on a bench.",
      "laptop2",
    ),
    id_card,
    record(
      104,
      "Umbrella",
      "Near Block 3",
      (2023, 11, 4),
      ItemStatus::Pending,
      "Large black umbrella",
      "umbrella",
    ),
  ]
}

/// A ledger holding the demo records.
pub fn ledger() -> Ledger {
  // Ids are unique within each list, so construction cannot fail.
  Ledger::from_items(lost_items(), found_items()).unwrap_or_default()
}
