use crate::mock_backend::action;
use commit2act::backend::ActionItem;
use commit2act::editor::{FormState, ValidationRules};
use commit2act::ui::components::{ActionDialogComponent, Focus};
use commit2act::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(dialog: &mut ActionDialogComponent, text: &str) {
    for c in text.chars() {
        dialog.handle_key_events(key(KeyCode::Char(c)));
    }
}

fn editing_dialog() -> ActionDialogComponent {
    let mut dialog = ActionDialogComponent::new(1, action(7, "Recycle", &["bottle"]), ValidationRules::default());
    dialog.load_items(vec![ActionItem::new("Bottle", "Plastic bottle", "12.5")]);
    dialog.handle_key_events(key(KeyCode::Char('e')));
    dialog
}

#[test]
fn test_escape_while_viewing_closes() {
    let mut dialog = ActionDialogComponent::new(1, action(7, "Recycle", &[]), ValidationRules::default());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::CloseDialog));
}

#[test]
fn test_typing_edits_the_focused_field() {
    let mut dialog = editing_dialog();
    assert_eq!(dialog.form().state(), FormState::Editing);
    assert_eq!(dialog.focus(), Focus::ActionName);

    dialog.handle_key_events(key(KeyCode::Backspace));
    type_text(&mut dialog, "ing");
    assert_eq!(dialog.form().draft().unwrap().name, "Recycling");
}

#[test]
fn test_add_item_from_sub_form() {
    let mut dialog = editing_dialog();
    // ActionName -> Icon -> Items -> Labels -> ItemName
    for _ in 0..4 {
        dialog.handle_key_events(key(KeyCode::Tab));
    }
    assert_eq!(dialog.focus(), Focus::ItemName);

    type_text(&mut dialog, "Can");
    dialog.handle_key_events(key(KeyCode::Tab));
    type_text(&mut dialog, "Tin can");
    dialog.handle_key_events(key(KeyCode::Tab));
    type_text(&mut dialog, "3");
    dialog.handle_key_events(key(KeyCode::Enter));

    let items = &dialog.form().draft().unwrap().items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].item_name, "Can");
}

#[test]
fn test_save_shortcut_emits_save_action() {
    let mut dialog = editing_dialog();
    match dialog.handle_key_events(ctrl('s')) {
        Action::SaveAction { session, args, .. } => {
            assert_eq!(session, 1);
            assert_eq!(args.action_id, 7);
        }
        other => panic!("expected save, got {:?}", other),
    }
    assert_eq!(dialog.form().state(), FormState::Saving);
}

#[test]
fn test_save_before_items_load_is_refused() {
    let mut dialog = ActionDialogComponent::new(1, action(7, "Recycle", &["bottle"]), ValidationRules::default());
    dialog.handle_key_events(key(KeyCode::Char('e')));

    assert!(matches!(dialog.handle_key_events(ctrl('s')), Action::ShowInfo(_)));
    assert_eq!(dialog.form().state(), FormState::Editing);
}

#[test]
fn test_invalid_save_stays_in_dialog() {
    let mut dialog = editing_dialog();
    // Clear the action name
    for _ in 0.."Recycle".len() {
        dialog.handle_key_events(key(KeyCode::Backspace));
    }
    assert!(matches!(dialog.handle_key_events(ctrl('s')), Action::None));
    assert_eq!(dialog.form().state(), FormState::Editing);
    assert!(dialog.form().form_error());
}

#[test]
fn test_close_with_unsaved_changes_asks_first() {
    let mut dialog = editing_dialog();
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::None));
    assert_eq!(dialog.form().state(), FormState::ClosingConfirm);

    dialog.handle_key_events(key(KeyCode::Char('n')));
    assert_eq!(dialog.form().state(), FormState::Editing);

    dialog.handle_key_events(key(KeyCode::Esc));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Char('y'))), Action::CloseDialog));
    assert!(dialog.form().draft().is_none());
}

#[test]
fn test_delete_shortcut_needs_confirmation() {
    let mut dialog = editing_dialog();
    assert!(matches!(dialog.handle_key_events(ctrl('d')), Action::None));
    assert_eq!(dialog.form().state(), FormState::DeleteConfirm);

    match dialog.handle_key_events(key(KeyCode::Char('y'))) {
        Action::DeleteAction { action_id, .. } => assert_eq!(action_id, 7),
        other => panic!("expected delete, got {:?}", other),
    }
    assert_eq!(dialog.form().state(), FormState::Deleting);
}
