//! The action form state machine.
//!
//! An [`ActionForm`] owns one committed action and, while editing, a mutable
//! [`ActionDraft`] of it. All edits go through typed [`FormCommand`]s; network
//! calls are split into a synchronous "start" step that hands out a
//! [`SaveTicket`] and a "finish" step that applies the result, so late results
//! for a draft that no longer exists are recognised and dropped.

use log::{debug, info, warn};
use std::path::PathBuf;

use super::item_form::{remove_items_named, ActionItemForm, ItemField};
use super::labels::{remove_label, LabelEditor};
use super::validity::{Field, FieldValidity, ValidationRules};
use crate::backend::{ActionItem, Backend, BackendAction, BackendError, UpdateActionArgs};

/// Lifecycle of an action dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Viewing,
    Editing,
    Saving,
    ClosingConfirm,
    DeleteConfirm,
    Deleting,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {operation} while {state:?}")]
    InvalidState { operation: &'static str, state: FormState },

    /// The draft does not hold the committed items yet, so saving it would
    /// drop them on the server.
    #[error("cannot {operation} before the action's items have loaded")]
    ItemsNotLoaded { operation: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// The icon of a draft: untouched, or replaced by a local file awaiting upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconState {
    Committed(Option<String>),
    Replaced(PathBuf),
}

impl IconState {
    /// Reference sent to the API: the committed value or the new file's name.
    pub fn reference(&self) -> Option<String> {
        match self {
            IconState::Committed(reference) => reference.clone(),
            IconState::Replaced(path) => path.file_name().map(|name| name.to_string_lossy().into_owned()),
        }
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self, IconState::Replaced(_))
    }
}

/// In-memory edit state of an action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDraft {
    pub name: String,
    pub icon: IconState,
    pub items: Vec<ActionItem>,
    pub labels: Vec<String>,
}

impl ActionDraft {
    pub fn from_committed(action: &BackendAction, items: &[ActionItem]) -> Self {
        Self {
            name: action.action_name.clone(),
            icon: IconState::Committed(action.action_icon.clone()),
            items: items.to_vec(),
            labels: action.validation_labels.clone(),
        }
    }
}

/// Scalar fields of the draft itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    ActionName,
}

/// Every edit a user can make while the form is in [`FormState::Editing`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    UpdateItemField(ItemField, String),
    UpdateLabelField(String),
    UpdateDraftField(DraftField, String),
    AddItem,
    RemoveItem(String),
    AddLabel,
    RemoveLabel(String),
    ReplaceIcon(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Nothing to lose; the dialog may close now.
    Closed,
    /// Unsaved work exists; the form is waiting in `ClosingConfirm`.
    NeedsConfirmation,
}

/// Identifies one in-flight save or delete of one edit generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; no call should be made.
    Rejected(FieldValidity),
    /// The form is `Saving`; send `args` and report back with the ticket.
    Ready(SaveTicket, UpdateActionArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(BackendAction),
    Rejected(FieldValidity),
}

pub struct ActionForm {
    committed: BackendAction,
    committed_items: Vec<ActionItem>,
    items_loaded: bool,
    draft: Option<ActionDraft>,
    draft_awaits_items: bool,
    item_form: ActionItemForm,
    label_editor: LabelEditor,
    state: FormState,
    resume_state: FormState,
    form_error: bool,
    last_error: Option<String>,
    generation: u64,
    rules: ValidationRules,
}

impl ActionForm {
    pub fn new(action: BackendAction, rules: ValidationRules) -> Self {
        Self {
            committed: action,
            committed_items: Vec::new(),
            items_loaded: false,
            draft: None,
            draft_awaits_items: false,
            item_form: ActionItemForm::new(),
            label_editor: LabelEditor::new(),
            state: FormState::Viewing,
            resume_state: FormState::Editing,
            form_error: false,
            last_error: None,
            generation: 0,
            rules,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn committed(&self) -> &BackendAction {
        &self.committed
    }

    pub fn committed_items(&self) -> &[ActionItem] {
        &self.committed_items
    }

    pub fn items_loaded(&self) -> bool {
        self.items_loaded
    }

    pub fn draft(&self) -> Option<&ActionDraft> {
        self.draft.as_ref()
    }

    pub fn item_form(&self) -> &ActionItemForm {
        &self.item_form
    }

    pub fn label_editor(&self) -> &LabelEditor {
        &self.label_editor
    }

    pub fn form_error(&self) -> bool {
        self.form_error
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// True while a draft exists, including the confirmation sub-states.
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Install the result of the initial item fetch.
    ///
    /// A draft seeded before the items arrived receives them ahead of anything
    /// the user has added since. A draft already on its way to the server is
    /// left alone.
    pub fn load_items(&mut self, items: Vec<ActionItem>) {
        if let Some(draft) = self.draft.as_mut() {
            if self.draft_awaits_items && self.state != FormState::Saving {
                draft.items.splice(0..0, items.iter().cloned());
                self.draft_awaits_items = false;
            }
        }
        self.committed_items = items;
        self.items_loaded = true;
    }

    pub fn enter_edit(&mut self) -> Result<(), TransitionError> {
        self.expect_state("enter edit mode", &[FormState::Viewing])?;

        self.generation += 1;
        self.draft = Some(ActionDraft::from_committed(&self.committed, &self.committed_items));
        self.draft_awaits_items = !self.items_loaded;
        self.item_form.reset();
        self.label_editor = LabelEditor::new();
        self.form_error = false;
        self.last_error = None;
        self.state = FormState::Editing;
        debug!("Editing action {} (generation {})", self.committed.action_id, self.generation);
        Ok(())
    }

    /// Apply one edit. Returns whether the command changed the draft or sub-forms.
    pub fn apply(&mut self, command: FormCommand) -> Result<bool, TransitionError> {
        self.expect_state("edit", &[FormState::Editing])?;
        let Some(draft) = self.draft.as_mut() else {
            return Err(TransitionError::InvalidState {
                operation: "edit",
                state: self.state,
            });
        };

        let changed = match command {
            FormCommand::UpdateItemField(field, value) => {
                self.item_form.update(field, value);
                true
            }
            FormCommand::UpdateLabelField(value) => {
                self.label_editor.update(value);
                true
            }
            FormCommand::UpdateDraftField(DraftField::ActionName, value) => {
                draft.name = value;
                true
            }
            FormCommand::AddItem => self.item_form.add_to(&mut draft.items, &self.rules),
            FormCommand::RemoveItem(name) => remove_items_named(&mut draft.items, &name) > 0,
            FormCommand::AddLabel => self.label_editor.add_to(&mut draft.labels, &self.rules),
            FormCommand::RemoveLabel(label) => remove_label(&mut draft.labels, &label),
            FormCommand::ReplaceIcon(path) => {
                draft.icon = IconState::Replaced(path);
                true
            }
        };
        Ok(changed)
    }

    /// Current validity of every field, derived from the draft (or the
    /// committed action when not editing).
    pub fn validity(&self) -> FieldValidity {
        match &self.draft {
            Some(draft) => FieldValidity::derive(draft, &self.item_form, &self.rules),
            None => FieldValidity::derive(
                &ActionDraft::from_committed(&self.committed, &self.committed_items),
                &self.item_form,
                &self.rules,
            ),
        }
    }

    /// Helper texts that should be on screen right now.
    pub fn visible_errors(&self) -> Vec<(Field, &'static str)> {
        let validity = self.validity();
        let mut errors = Vec::new();
        if self.item_form.show_errors {
            errors.extend(validity.item().failing().into_iter().map(|f| (f, f.helper_text())));
        }
        if self.form_error {
            errors.extend(validity.failing_draft_fields().into_iter().map(|f| (f, f.helper_text())));
        }
        errors
    }

    pub fn request_close(&mut self) -> Result<CloseOutcome, TransitionError> {
        match self.state {
            FormState::Viewing | FormState::Deleted => Ok(CloseOutcome::Closed),
            FormState::Editing | FormState::Saving => {
                self.resume_state = self.state;
                self.state = FormState::ClosingConfirm;
                Ok(CloseOutcome::NeedsConfirmation)
            }
            FormState::ClosingConfirm => Ok(CloseOutcome::NeedsConfirmation),
            state => Err(TransitionError::InvalidState {
                operation: "close",
                state,
            }),
        }
    }

    /// Discard the draft and return to viewing. Any in-flight save is orphaned.
    pub fn confirm_close(&mut self) -> Result<(), TransitionError> {
        self.expect_state("confirm close", &[FormState::ClosingConfirm])?;
        info!("Discarding draft of action {}", self.committed.action_id);
        self.discard_draft();
        Ok(())
    }

    pub fn cancel_close(&mut self) -> Result<(), TransitionError> {
        self.expect_state("cancel close", &[FormState::ClosingConfirm])?;
        self.state = self.resume_state;
        Ok(())
    }

    /// Check the composite predicate and, if it holds, move to `Saving`.
    pub fn submit(&mut self) -> Result<SubmitOutcome, TransitionError> {
        self.expect_state("save", &[FormState::Editing])?;
        if self.draft_awaits_items {
            return Err(TransitionError::ItemsNotLoaded { operation: "save" });
        }

        let validity = self.validity();
        if !validity.submittable() {
            self.form_error = true;
            debug!("Save rejected for action {}: {:?}", self.committed.action_id, validity);
            return Ok(SubmitOutcome::Rejected(validity));
        }

        let Some(draft) = self.draft.as_ref() else {
            return Err(TransitionError::InvalidState {
                operation: "save",
                state: self.state,
            });
        };

        let args = UpdateActionArgs {
            action_id: self.committed.action_id,
            action_name: draft.name.clone(),
            action_icon: draft.icon.reference(),
            validation_labels: draft.labels.clone(),
            action_items: draft.items.clone(),
            fallback_quiz_media: self.committed.fallback_quiz_media.clone(),
        };

        self.form_error = false;
        self.last_error = None;
        self.state = FormState::Saving;
        Ok(SubmitOutcome::Ready(self.ticket(), args))
    }

    /// Apply the gateway's answer to a save.
    ///
    /// Returns `Ok(false)` when the ticket is stale and the result was dropped.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<BackendAction, BackendError>,
    ) -> Result<bool, BackendError> {
        if !self.accepts(ticket, FormState::Saving) {
            debug!("Dropping late save result for action {}", self.committed.action_id);
            return Ok(false);
        }

        match result {
            Ok(action) => {
                info!("Saved action {}", action.action_id);
                if let Some(draft) = self.draft.take() {
                    self.committed_items = draft.items;
                    self.items_loaded = true;
                }
                self.committed = action;
                self.settle(FormState::Viewing);
                Ok(true)
            }
            Err(e) => {
                warn!("Saving action {} failed: {}", self.committed.action_id, e);
                self.last_error = Some(e.to_string());
                self.settle(FormState::Editing);
                Err(e)
            }
        }
    }

    /// Submit and send through `backend` in one go.
    pub async fn save(&mut self, backend: &dyn Backend) -> Result<SaveOutcome, EditorError> {
        let (ticket, args) = match self.submit()? {
            SubmitOutcome::Rejected(validity) => return Ok(SaveOutcome::Rejected(validity)),
            SubmitOutcome::Ready(ticket, args) => (ticket, args),
        };

        let result = backend.update_action(args).await;
        self.finish_save(ticket, result)?;
        Ok(SaveOutcome::Saved(self.committed.clone()))
    }

    pub fn request_delete(&mut self) -> Result<(), TransitionError> {
        self.expect_state("delete", &[FormState::Editing])?;
        self.state = FormState::DeleteConfirm;
        Ok(())
    }

    pub fn cancel_delete(&mut self) -> Result<(), TransitionError> {
        self.expect_state("cancel delete", &[FormState::DeleteConfirm])?;
        self.state = FormState::Editing;
        Ok(())
    }

    /// Move to `Deleting`; the caller issues the delete for the returned id.
    pub fn confirm_delete(&mut self) -> Result<(SaveTicket, i64), TransitionError> {
        self.expect_state("confirm delete", &[FormState::DeleteConfirm])?;
        self.last_error = None;
        self.state = FormState::Deleting;
        Ok((self.ticket(), self.committed.action_id))
    }

    pub fn finish_delete(&mut self, ticket: SaveTicket, result: Result<(), BackendError>) -> Result<bool, BackendError> {
        if !self.accepts(ticket, FormState::Deleting) {
            debug!("Dropping late delete result for action {}", self.committed.action_id);
            return Ok(false);
        }

        match result {
            Ok(()) => {
                info!("Deleted action {}", self.committed.action_id);
                self.draft = None;
                self.state = FormState::Deleted;
                Ok(true)
            }
            Err(e) => {
                warn!("Deleting action {} failed: {}", self.committed.action_id, e);
                self.last_error = Some(e.to_string());
                self.state = FormState::Editing;
                Err(e)
            }
        }
    }

    /// Confirm the pending delete and send it through `backend`.
    pub async fn delete(&mut self, backend: &dyn Backend) -> Result<(), EditorError> {
        let (ticket, action_id) = self.confirm_delete()?;
        let result = backend.delete_action(action_id).await;
        self.finish_delete(ticket, result)?;
        Ok(())
    }

    fn ticket(&self) -> SaveTicket {
        SaveTicket {
            generation: self.generation,
        }
    }

    /// A result is current if it belongs to this generation and the form is still
    /// waiting for it, possibly behind a close confirmation.
    fn accepts(&self, ticket: SaveTicket, waiting_state: FormState) -> bool {
        if ticket.generation != self.generation || self.draft.is_none() {
            return false;
        }
        self.state == waiting_state || (self.state == FormState::ClosingConfirm && self.resume_state == waiting_state)
    }

    /// Land in `target`, or record it as the state to resume after a pending
    /// close confirmation.
    fn settle(&mut self, target: FormState) {
        if self.state == FormState::ClosingConfirm {
            self.resume_state = target;
            if target == FormState::Viewing {
                // Nothing left to lose; the confirmation is moot.
                self.state = FormState::Viewing;
            }
        } else {
            self.state = target;
        }
    }

    fn discard_draft(&mut self) {
        self.generation += 1;
        self.draft = None;
        self.draft_awaits_items = false;
        self.item_form.reset();
        self.label_editor = LabelEditor::new();
        self.form_error = false;
        self.state = FormState::Viewing;
    }

    fn expect_state(&self, operation: &'static str, allowed: &[FormState]) -> Result<(), TransitionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(TransitionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}
