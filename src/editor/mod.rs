//! Editing of actions: the form state machine, its two sub-forms and the
//! validity rules they share.
//!
//! * [`action_form`] - The dialog lifecycle and draft ownership
//! * [`item_form`] - Action item sub-form
//! * [`labels`] - Validation label list editor
//! * [`validity`] - Per-field validity derivation

pub mod action_form;
pub mod item_form;
pub mod labels;
pub mod validity;

pub use action_form::{
    ActionDraft, ActionForm, CloseOutcome, DraftField, EditorError, FormCommand, FormState, IconState, SaveOutcome,
    SaveTicket, SubmitOutcome, TransitionError,
};
pub use item_form::{ActionItemForm, ItemField};
pub use labels::LabelEditor;
pub use validity::{Co2Pattern, Field, FieldValidity, ItemValidity, ValidationRules};
