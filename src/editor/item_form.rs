//! Action item sub-form: the single item being typed before it joins the draft.

use log::debug;

use super::validity::{ItemValidity, ValidationRules};
use crate::backend::ActionItem;

/// Inputs of the item sub-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Description,
    Co2SavedPerUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionItemForm {
    pub item_name: String,
    pub item_description: String,
    pub co2_saved_per_unit: String,
    /// Set after a rejected add; reveals per-field helper text.
    pub show_errors: bool,
}

impl ActionItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, field: ItemField, value: String) {
        match field {
            ItemField::Name => self.item_name = value,
            ItemField::Description => self.item_description = value,
            ItemField::Co2SavedPerUnit => self.co2_saved_per_unit = value,
        }
    }

    pub fn value(&self, field: ItemField) -> &str {
        match field {
            ItemField::Name => &self.item_name,
            ItemField::Description => &self.item_description,
            ItemField::Co2SavedPerUnit => &self.co2_saved_per_unit,
        }
    }

    pub fn validity(&self, rules: &ValidationRules) -> ItemValidity {
        ItemValidity::derive(self, rules)
    }

    /// Append the pending item to `items` if every field is valid.
    ///
    /// On success the form is cleared; otherwise `show_errors` is raised and
    /// `items` is left untouched. Items are never deduplicated.
    pub fn add_to(&mut self, items: &mut Vec<ActionItem>, rules: &ValidationRules) -> bool {
        if !self.validity(rules).all_valid() {
            self.show_errors = true;
            return false;
        }

        let item = ActionItem {
            item_name: std::mem::take(&mut self.item_name),
            item_description: std::mem::take(&mut self.item_description),
            co2_saved_per_unit: std::mem::take(&mut self.co2_saved_per_unit),
        };
        debug!("Adding action item '{}'", item.item_name);
        items.push(item);
        self.show_errors = false;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Remove every item named `name`; returns how many were removed.
pub fn remove_items_named(items: &mut Vec<ActionItem>, name: &str) -> usize {
    let before = items.len();
    items.retain(|item| item.item_name != name);
    before - items.len()
}
