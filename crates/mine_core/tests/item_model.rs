use mine_core::model::item::{PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TEXT};
use mine_core::{Item, ItemValidationError};
use uuid::Uuid;

#[test]
fn item_new_generates_unique_uuid_ids() {
    let first = Item::new("Milk", "2%");
    let second = Item::new("Milk", "2%");

    assert!(Uuid::parse_str(&first.id).is_ok());
    assert_ne!(first.id, second.id);
    assert_eq!(first.value, 0);
    assert!(first.validate().is_ok());
}

#[test]
fn placeholder_matches_create_page_defaults() {
    let item = Item::placeholder();

    assert_eq!(item.text, PLACEHOLDER_TEXT);
    assert_eq!(item.description, PLACEHOLDER_DESCRIPTION);
    assert!(item.validate().is_ok());
}

#[test]
fn blank_id_fails_validation() {
    let item = Item::with_id("", "Milk", "2%");
    assert_eq!(item.validate(), Err(ItemValidationError::MissingId));
}

#[test]
fn item_serialization_uses_expected_wire_fields() {
    let item = Item::with_id("1", "Milk", "2%").with_value(3);

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], "1");
    assert_eq!(json["text"], "Milk");
    assert_eq!(json["description"], "2%");
    assert_eq!(json["value"], 3);

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn missing_value_field_defaults_to_zero() {
    let decoded: Item =
        serde_json::from_str(r#"{"id":"1","text":"Milk","description":"2%"}"#).unwrap();
    assert_eq!(decoded.value, 0);
}
