use crate::mock_backend::action;
use chrono::NaiveDate;
use commit2act::backend::{ActionItem, BackendError};
use commit2act::ui::components::{SubmissionDialogComponent, SubmitFocus};
use commit2act::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(dialog: &mut SubmissionDialogComponent, text: &str) {
    for c in text.chars() {
        dialog.handle_key_events(key(KeyCode::Char(c)));
    }
}

fn march_14() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, 14).unwrap()
}

fn loaded_dialog() -> SubmissionDialogComponent {
    let mut dialog = SubmissionDialogComponent::new(2, action(7, "Recycle", &["bottle"]), march_14());
    dialog.load_items(vec![
        ActionItem::new("Bottle", "Plastic bottle", "12.5"),
        ActionItem::new("Can", "Tin can", "3"),
    ]);
    dialog
}

#[test]
fn test_quantities_build_the_submission() {
    let mut dialog = loaded_dialog();
    assert_eq!(dialog.focus(), SubmitFocus::Items);

    type_text(&mut dialog, "2");
    dialog.handle_key_events(key(KeyCode::Down));
    type_text(&mut dialog, "4");

    match dialog.handle_key_events(key(KeyCode::Enter)) {
        Action::SubmitAction { session, draft } => {
            assert_eq!(session, 2);
            assert_eq!(draft.action_id, 7);
            assert_eq!(draft.date_of_action, march_14());
            assert_eq!(draft.g_co2_saved(), 37.0);
            assert_eq!(draft.points_earned(), 0);
        }
        other => panic!("expected submit, got {:?}", other),
    }
    assert!(dialog.is_submitting());

    // Input is ignored while the call is in flight
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::None));
}

#[test]
fn test_correct_quiz_answer_earns_points() {
    let mut dialog = loaded_dialog();
    type_text(&mut dialog, "1");

    // First-answer flag needs the quiz to be answered
    dialog.handle_key_events(key(KeyCode::Tab));
    dialog.handle_key_events(key(KeyCode::Tab));
    assert_eq!(dialog.focus(), SubmitFocus::FirstAnswerCorrect);
    dialog.handle_key_events(key(KeyCode::Char(' ')));
    assert_eq!(dialog.build_draft().unwrap().points_earned(), 0);

    dialog.handle_key_events(key(KeyCode::BackTab));
    dialog.handle_key_events(key(KeyCode::Char(' ')));
    dialog.handle_key_events(key(KeyCode::Tab));
    dialog.handle_key_events(key(KeyCode::Char(' ')));

    let draft = dialog.build_draft().unwrap();
    assert!(draft.quiz_answered);
    assert!(draft.first_quiz_answer_correct);
    assert_eq!(draft.points_earned(), 10);
}

#[test]
fn test_submission_needs_a_quantity() {
    let mut dialog = loaded_dialog();
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));
    assert!(!dialog.is_submitting());
    assert!(dialog.error().unwrap().contains("at least 1 item"));
}

#[test]
fn test_invalid_date_is_reported() {
    let mut dialog = loaded_dialog();
    type_text(&mut dialog, "1");
    dialog.handle_key_events(key(KeyCode::BackTab));
    assert_eq!(dialog.focus(), SubmitFocus::Date);
    for _ in 0.."2023-03-14".len() {
        dialog.handle_key_events(key(KeyCode::Backspace));
    }
    type_text(&mut dialog, "yesterday");

    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));
    assert!(dialog.error().unwrap().contains("YYYY-MM-DD"));
}

#[test]
fn test_submit_waits_for_items() {
    let mut dialog = SubmissionDialogComponent::new(2, action(7, "Recycle", &[]), march_14());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));
    assert!(!dialog.is_submitting());
}

#[test]
fn test_failed_submission_can_be_retried() {
    let mut dialog = loaded_dialog();
    type_text(&mut dialog, "1");
    assert!(matches!(
        dialog.handle_key_events(key(KeyCode::Enter)),
        Action::SubmitAction { .. }
    ));

    let result = dialog.finish_submit(Err(BackendError::Network("offline".to_string())));
    assert!(result.is_err());
    assert!(!dialog.is_submitting());
    assert!(dialog.error().unwrap().contains("offline"));
    assert!(matches!(
        dialog.handle_key_events(key(KeyCode::Enter)),
        Action::SubmitAction { .. }
    ));
}
