use commit2act::editor::labels::{join_labels, remove_label, split_labels};
use commit2act::editor::{LabelEditor, ValidationRules};

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_add_label_clears_input() {
    let mut editor = LabelEditor::new();
    let mut list = Vec::new();

    editor.update("bottle".to_string());
    assert!(editor.add_to(&mut list, &ValidationRules::default()));
    assert_eq!(list, labels(&["bottle"]));
    assert!(editor.pending.is_empty());
}

#[test]
fn test_empty_label_rejected_by_default() {
    let mut editor = LabelEditor::new();
    let mut list = Vec::new();

    assert!(!editor.add_to(&mut list, &ValidationRules::default()));
    assert!(list.is_empty());

    assert!(editor.add_to(&mut list, &ValidationRules::legacy()));
    assert_eq!(list, labels(&[""]));
}

#[test]
fn test_remove_label_removes_first_occurrence_only() {
    let mut list = labels(&["A", "B", "A"]);
    assert!(remove_label(&mut list, "A"));
    assert_eq!(list, labels(&["B", "A"]));
}

#[test]
fn test_remove_missing_label_is_noop() {
    let mut list = labels(&["A"]);
    assert!(!remove_label(&mut list, "Z"));
    assert_eq!(list, labels(&["A"]));
}

#[test]
fn test_wire_format() {
    assert!(split_labels("").is_empty());
    assert_eq!(split_labels("bottle, can"), labels(&["bottle", "can"]));
    assert_eq!(join_labels(&labels(&["bottle", "can"])), "bottle, can");
    assert_eq!(join_labels(&[]), "");
}
