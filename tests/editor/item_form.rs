use commit2act::backend::ActionItem;
use commit2act::editor::item_form::remove_items_named;
use commit2act::editor::validity::Field;
use commit2act::editor::{ActionItemForm, ItemField, ValidationRules};

fn filled(name: &str, description: &str, co2: &str) -> ActionItemForm {
    let mut form = ActionItemForm::new();
    form.update(ItemField::Name, name.to_string());
    form.update(ItemField::Description, description.to_string());
    form.update(ItemField::Co2SavedPerUnit, co2.to_string());
    form
}

#[test]
fn test_add_valid_item_resets_form() {
    let mut form = filled("Bottle", "Plastic bottle", "12.5");
    let mut items = Vec::new();

    assert!(form.add_to(&mut items, &ValidationRules::default()));
    assert_eq!(items, vec![ActionItem::new("Bottle", "Plastic bottle", "12.5")]);
    assert_eq!(form, ActionItemForm::new());
}

#[test]
fn test_add_invalid_item_shows_errors() {
    let mut form = filled("Bottle", "", "abc");
    let mut items = Vec::new();
    let rules = ValidationRules::default();

    assert!(!form.add_to(&mut items, &rules));
    assert!(items.is_empty());
    assert!(form.show_errors);
    // Input is kept for correction
    assert_eq!(form.value(ItemField::Name), "Bottle");
    assert_eq!(form.validity(&rules).failing(), vec![Field::ItemDescription, Field::Co2]);
}

#[test]
fn test_duplicates_are_kept() {
    let mut items = Vec::new();
    let rules = ValidationRules::default();
    for _ in 0..2 {
        let mut form = filled("X", "desc", "1");
        assert!(form.add_to(&mut items, &rules));
    }
    assert_eq!(items.len(), 2);
}

#[test]
fn test_remove_items_removes_every_match() {
    let mut items = vec![
        ActionItem::new("X", "first", "1"),
        ActionItem::new("X", "second", "2"),
    ];
    assert_eq!(remove_items_named(&mut items, "X"), 2);
    assert!(items.is_empty());
}

#[test]
fn test_remove_missing_item_is_noop() {
    let mut items = vec![ActionItem::new("Bottle", "Plastic bottle", "12.5")];
    assert_eq!(remove_items_named(&mut items, "Can"), 0);
    assert_eq!(items.len(), 1);
}
