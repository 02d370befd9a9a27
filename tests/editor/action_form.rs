use crate::mock_backend::{action, MockBackend};
use commit2act::backend::{ActionItem, BackendError};
use commit2act::editor::validity::Field;
use commit2act::editor::{
    ActionForm, CloseOutcome, DraftField, EditorError, FormCommand, FormState, ItemField, SaveOutcome, SubmitOutcome,
    TransitionError, ValidationRules,
};
use std::path::PathBuf;

fn bottle() -> ActionItem {
    ActionItem::new("Bottle", "Plastic bottle", "12.5")
}

fn editing_form() -> ActionForm {
    let mut form = ActionForm::new(action(7, "Recycle", &["bottle"]), ValidationRules::default());
    form.load_items(vec![bottle()]);
    form.enter_edit().unwrap();
    form
}

fn type_item(form: &mut ActionForm, name: &str, description: &str, co2: &str) {
    form.apply(FormCommand::UpdateItemField(ItemField::Name, name.to_string())).unwrap();
    form.apply(FormCommand::UpdateItemField(ItemField::Description, description.to_string()))
        .unwrap();
    form.apply(FormCommand::UpdateItemField(ItemField::Co2SavedPerUnit, co2.to_string()))
        .unwrap();
}

#[test]
fn test_new_form_is_viewing() {
    let form = ActionForm::new(action(1, "Recycle", &[]), ValidationRules::default());
    assert_eq!(form.state(), FormState::Viewing);
    assert!(form.draft().is_none());
    assert!(!form.items_loaded());
}

#[test]
fn test_edits_rejected_outside_editing() {
    let mut form = ActionForm::new(action(1, "Recycle", &[]), ValidationRules::default());
    let result = form.apply(FormCommand::AddLabel);
    assert_eq!(
        result,
        Err(TransitionError::InvalidState {
            operation: "edit",
            state: FormState::Viewing
        })
    );
}

#[test]
fn test_enter_edit_copies_committed_values() {
    let form = editing_form();
    let draft = form.draft().unwrap();
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(draft.name, "Recycle");
    assert_eq!(draft.items, vec![bottle()]);
    assert_eq!(draft.labels, vec!["bottle".to_string()]);
}

#[test]
fn test_items_arriving_after_edit_are_spliced_in() {
    let mut form = ActionForm::new(action(1, "Recycle", &["can"]), ValidationRules::default());
    form.enter_edit().unwrap();
    type_item(&mut form, "Can", "Tin can", "3");
    form.apply(FormCommand::AddItem).unwrap();

    form.load_items(vec![bottle()]);

    let names: Vec<&str> = form.draft().unwrap().items.iter().map(|i| i.item_name.as_str()).collect();
    assert_eq!(names, vec!["Bottle", "Can"]);
    assert_eq!(form.committed_items(), &[bottle()]);
}

#[test]
fn test_save_waits_for_committed_items() {
    let mut form = ActionForm::new(action(1, "Recycle", &["can"]), ValidationRules::default());
    form.enter_edit().unwrap();
    type_item(&mut form, "Can", "Tin can", "3");
    form.apply(FormCommand::AddItem).unwrap();

    assert_eq!(
        form.submit(),
        Err(TransitionError::ItemsNotLoaded { operation: "save" })
    );
    assert_eq!(form.state(), FormState::Editing);

    form.load_items(vec![bottle()]);
    let (ticket, args) = match form.submit().unwrap() {
        SubmitOutcome::Ready(ticket, args) => (ticket, args),
        other => panic!("expected ready, got {:?}", other),
    };
    let sent: Vec<&str> = args.action_items.iter().map(|i| i.item_name.as_str()).collect();
    assert_eq!(sent, vec!["Bottle", "Can"]);

    form.finish_save(ticket, Ok(action(1, "Recycle", &["can"]))).unwrap();
    assert_eq!(form.committed_items(), args.action_items.as_slice());
}

#[tokio::test]
async fn test_save_before_items_load_makes_no_call() {
    let backend = MockBackend::new();
    let mut form = ActionForm::new(action(7, "Recycle", &["bottle"]), ValidationRules::default());
    form.enter_edit().unwrap();

    let result = form.save(&backend).await;
    assert!(matches!(
        result,
        Err(EditorError::Transition(TransitionError::ItemsNotLoaded { .. }))
    ));
    assert!(backend.updates.lock().unwrap().is_empty());
}

#[test]
fn test_submit_with_empty_items_is_rejected() {
    let mut form = ActionForm::new(action(1, "Recycle", &["bottle"]), ValidationRules::default());
    form.load_items(vec![]);
    form.enter_edit().unwrap();

    match form.submit().unwrap() {
        SubmitOutcome::Rejected(validity) => assert!(!validity.action_items),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(form.state(), FormState::Editing);
    assert!(form.form_error());
    assert!(form
        .visible_errors()
        .iter()
        .any(|(field, _)| *field == Field::ActionItems));
}

#[test]
fn test_add_item_through_form() {
    let mut form = editing_form();
    type_item(&mut form, "Can", "Tin can", "3");
    assert!(form.apply(FormCommand::AddItem).unwrap());

    assert_eq!(form.draft().unwrap().items.len(), 2);
    assert!(form.item_form().item_name.is_empty());
    assert!(form.visible_errors().is_empty());
}

#[test]
fn test_invalid_item_reveals_item_errors() {
    let mut form = editing_form();
    type_item(&mut form, "Can", "Tin can", "abc12");
    assert!(!form.apply(FormCommand::AddItem).unwrap());

    assert_eq!(form.visible_errors(), vec![(Field::Co2, Field::Co2.helper_text())]);
}

#[test]
fn test_remove_commands() {
    let mut form = editing_form();
    form.apply(FormCommand::UpdateLabelField("can".to_string())).unwrap();
    form.apply(FormCommand::AddLabel).unwrap();
    form.apply(FormCommand::UpdateLabelField("bottle".to_string())).unwrap();
    form.apply(FormCommand::AddLabel).unwrap();
    assert_eq!(form.draft().unwrap().labels, vec!["bottle", "can", "bottle"]);

    assert!(form.apply(FormCommand::RemoveLabel("bottle".to_string())).unwrap());
    assert_eq!(form.draft().unwrap().labels, vec!["can", "bottle"]);

    assert!(!form.apply(FormCommand::RemoveItem("Nothing".to_string())).unwrap());
    assert!(form.apply(FormCommand::RemoveItem("Bottle".to_string())).unwrap());
    assert!(form.draft().unwrap().items.is_empty());
}

#[test]
fn test_replace_icon_sends_file_name() {
    let mut form = editing_form();
    form.apply(FormCommand::ReplaceIcon(PathBuf::from("/tmp/icons/leaf.png")))
        .unwrap();

    match form.submit().unwrap() {
        SubmitOutcome::Ready(_, args) => assert_eq!(args.action_icon.as_deref(), Some("leaf.png")),
        other => panic!("expected ready, got {:?}", other),
    }
}

#[test]
fn test_close_without_draft_closes_immediately() {
    let mut form = ActionForm::new(action(1, "Recycle", &[]), ValidationRules::default());
    assert_eq!(form.request_close().unwrap(), CloseOutcome::Closed);
}

#[test]
fn test_close_with_draft_needs_confirmation() {
    let mut form = editing_form();
    form.apply(FormCommand::UpdateDraftField(DraftField::ActionName, "Reuse".to_string()))
        .unwrap();

    assert_eq!(form.request_close().unwrap(), CloseOutcome::NeedsConfirmation);
    assert_eq!(form.state(), FormState::ClosingConfirm);

    form.cancel_close().unwrap();
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(form.draft().unwrap().name, "Reuse");

    form.request_close().unwrap();
    form.confirm_close().unwrap();
    assert_eq!(form.state(), FormState::Viewing);
    assert!(form.draft().is_none());
    assert_eq!(form.committed().action_name, "Recycle");
}

#[test]
fn test_late_save_after_close_is_ignored() {
    let mut form = editing_form();
    let ticket = match form.submit().unwrap() {
        SubmitOutcome::Ready(ticket, _) => ticket,
        other => panic!("expected ready, got {:?}", other),
    };
    assert_eq!(form.state(), FormState::Saving);

    form.request_close().unwrap();
    form.confirm_close().unwrap();

    let late = action(7, "Renamed elsewhere", &["x"]);
    assert!(!form.finish_save(ticket, Ok(late)).unwrap());
    assert_eq!(form.committed().action_name, "Recycle");
    assert_eq!(form.state(), FormState::Viewing);
}

#[test]
fn test_save_result_during_close_confirmation_is_applied() {
    let mut form = editing_form();
    let (ticket, args) = match form.submit().unwrap() {
        SubmitOutcome::Ready(ticket, args) => (ticket, args),
        other => panic!("expected ready, got {:?}", other),
    };
    form.request_close().unwrap();

    let saved = action(args.action_id, &args.action_name, &["bottle"]);
    assert!(form.finish_save(ticket, Ok(saved)).unwrap());
    assert_eq!(form.state(), FormState::Viewing);
}

#[test]
fn test_failed_save_keeps_draft() {
    let mut form = editing_form();
    form.apply(FormCommand::UpdateDraftField(DraftField::ActionName, "Reuse".to_string()))
        .unwrap();
    let ticket = match form.submit().unwrap() {
        SubmitOutcome::Ready(ticket, _) => ticket,
        other => panic!("expected ready, got {:?}", other),
    };

    let result = form.finish_save(ticket, Err(BackendError::Network("timeout".to_string())));
    assert!(matches!(result, Err(BackendError::Network(_))));
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(form.draft().unwrap().name, "Reuse");
    assert!(form.last_error().unwrap().contains("timeout"));
}

#[tokio::test]
async fn test_save_through_backend() {
    let backend = MockBackend::new().with_action(action(7, "Recycle", &["bottle"]), vec![bottle()]);
    let mut form = editing_form();
    form.apply(FormCommand::UpdateDraftField(DraftField::ActionName, "Recycle more".to_string()))
        .unwrap();

    match form.save(&backend).await.unwrap() {
        SaveOutcome::Saved(saved) => assert_eq!(saved.action_name, "Recycle more"),
        other => panic!("expected saved, got {:?}", other),
    }
    assert_eq!(form.state(), FormState::Viewing);
    assert_eq!(form.committed().action_name, "Recycle more");

    let updates = backend.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].action_items, vec![bottle()]);
    assert_eq!(updates[0].validation_labels, vec!["bottle".to_string()]);
}

#[tokio::test]
async fn test_rejected_save_makes_no_call() {
    let backend = MockBackend::new();
    let mut form = editing_form();
    form.apply(FormCommand::RemoveItem("Bottle".to_string())).unwrap();

    assert!(matches!(form.save(&backend).await.unwrap(), SaveOutcome::Rejected(_)));
    assert!(backend.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_save_transport_failure() {
    let backend = MockBackend::new();
    backend.fail("connection reset");
    let mut form = editing_form();

    let result = form.save(&backend).await;
    assert!(matches!(result, Err(EditorError::Backend(BackendError::Network(_)))));
    assert_eq!(form.state(), FormState::Editing);
    assert!(form.draft().is_some());
}

#[tokio::test]
async fn test_delete_flow() {
    let backend = MockBackend::new().with_action(action(7, "Recycle", &["bottle"]), vec![bottle()]);
    let mut form = editing_form();

    form.request_delete().unwrap();
    assert_eq!(form.state(), FormState::DeleteConfirm);
    form.cancel_delete().unwrap();
    assert_eq!(form.state(), FormState::Editing);

    form.request_delete().unwrap();
    form.delete(&backend).await.unwrap();
    assert_eq!(form.state(), FormState::Deleted);
    assert_eq!(*backend.deletes.lock().unwrap(), vec![7]);
    assert_eq!(form.request_close().unwrap(), CloseOutcome::Closed);
}

#[tokio::test]
async fn test_delete_failure_returns_to_editing() {
    let backend = MockBackend::new();
    backend.fail("server down");
    let mut form = editing_form();

    form.request_delete().unwrap();
    assert!(form.delete(&backend).await.is_err());
    assert_eq!(form.state(), FormState::Editing);
    assert!(form.draft().is_some());
}
