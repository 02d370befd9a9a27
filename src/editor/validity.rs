//! Field validity derivation.
//!
//! Every flag is computed from the current draft and item sub-form, one function
//! per field, so flags can never drift from the data they describe.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::action_form::ActionDraft;
use super::item_form::ActionItemForm;
use crate::backend::ActionItem;
use crate::constants::{
    HELP_ACTION_ITEMS_REQUIRED, HELP_ACTION_NAME_REQUIRED, HELP_CO2_NUMBER, HELP_INPUT_REQUIRED,
    HELP_VALIDATION_LABELS_REQUIRED,
};

/// Whole-string decimal: digits, optionally one point followed by digits.
static STRICT_CO2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid regex"));

/// End-anchored only; accepts any prefix before a trailing number.
static LEGACY_CO2: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+([.][0-9]+)?$").expect("valid regex"));

/// How the CO2-per-unit input is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Co2Pattern {
    /// The whole input must be a non-negative decimal number.
    #[default]
    Strict,
    /// Historic behavior: only the end of the input has to look numeric, so
    /// "abc12" passes. Kept for data entered before the pattern was anchored.
    ///
    /// The gateway still sends the value as a number, so a draft holding such
    /// an item is accepted by the form but every save of it fails with
    /// `BackendError::InvalidData` and the draft stays in `Editing`.
    Legacy,
}

/// Knobs for the loose historic behaviors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    pub co2_pattern: Co2Pattern,
    pub allow_empty_labels: bool,
}

impl ValidationRules {
    pub fn legacy() -> Self {
        Self {
            co2_pattern: Co2Pattern::Legacy,
            allow_empty_labels: true,
        }
    }
}

/// Presence check only; whitespace-only input counts as present.
pub fn item_name_valid(value: &str) -> bool {
    !value.is_empty()
}

/// Presence check only; whitespace-only input counts as present.
pub fn item_description_valid(value: &str) -> bool {
    !value.is_empty()
}

pub fn co2_valid(value: &str, rules: &ValidationRules) -> bool {
    match rules.co2_pattern {
        Co2Pattern::Strict => STRICT_CO2.is_match(value),
        Co2Pattern::Legacy => LEGACY_CO2.is_match(value),
    }
}

pub fn action_name_valid(value: &str) -> bool {
    !value.is_empty()
}

pub fn action_items_valid(items: &[ActionItem]) -> bool {
    !items.is_empty()
}

/// Count check, not a content check.
pub fn validation_labels_valid(labels: &[String]) -> bool {
    !labels.is_empty()
}

/// Names of the fields that carry a validity flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Co2,
    ItemName,
    ItemDescription,
    ActionName,
    ActionItems,
    ValidationLabels,
}

impl Field {
    pub fn helper_text(self) -> &'static str {
        match self {
            Field::Co2 => HELP_CO2_NUMBER,
            Field::ItemName | Field::ItemDescription => HELP_INPUT_REQUIRED,
            Field::ActionName => HELP_ACTION_NAME_REQUIRED,
            Field::ActionItems => HELP_ACTION_ITEMS_REQUIRED,
            Field::ValidationLabels => HELP_VALIDATION_LABELS_REQUIRED,
        }
    }
}

/// Validity of the item sub-form fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemValidity {
    pub co2: bool,
    pub item_name: bool,
    pub item_description: bool,
}

impl ItemValidity {
    pub fn derive(form: &ActionItemForm, rules: &ValidationRules) -> Self {
        Self {
            co2: co2_valid(&form.co2_saved_per_unit, rules),
            item_name: item_name_valid(&form.item_name),
            item_description: item_description_valid(&form.item_description),
        }
    }

    pub fn all_valid(&self) -> bool {
        self.co2 && self.item_name && self.item_description
    }

    pub fn failing(&self) -> Vec<Field> {
        let mut failing = Vec::new();
        if !self.item_name {
            failing.push(Field::ItemName);
        }
        if !self.item_description {
            failing.push(Field::ItemDescription);
        }
        if !self.co2 {
            failing.push(Field::Co2);
        }
        failing
    }
}

/// Validity of every tracked field of an action being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldValidity {
    pub co2: bool,
    pub item_name: bool,
    pub item_description: bool,
    pub action_name: bool,
    pub action_items: bool,
    pub validation_labels: bool,
}

impl FieldValidity {
    pub fn derive(draft: &ActionDraft, item_form: &ActionItemForm, rules: &ValidationRules) -> Self {
        let item = ItemValidity::derive(item_form, rules);
        Self {
            co2: item.co2,
            item_name: item.item_name,
            item_description: item.item_description,
            action_name: action_name_valid(&draft.name),
            action_items: action_items_valid(&draft.items),
            validation_labels: validation_labels_valid(&draft.labels),
        }
    }

    pub fn item(&self) -> ItemValidity {
        ItemValidity {
            co2: self.co2,
            item_name: self.item_name,
            item_description: self.item_description,
        }
    }

    /// The composite predicate guarding submission.
    pub fn submittable(&self) -> bool {
        self.action_items && self.action_name && self.validation_labels
    }

    /// Draft-level fields that currently fail.
    pub fn failing_draft_fields(&self) -> Vec<Field> {
        let mut failing = Vec::new();
        if !self.action_name {
            failing.push(Field::ActionName);
        }
        if !self.action_items {
            failing.push(Field::ActionItems);
        }
        if !self.validation_labels {
            failing.push(Field::ValidationLabels);
        }
        failing
    }
}
