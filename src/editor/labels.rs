//! Validation label list editor.

use super::validity::ValidationRules;

/// Separator used by the API for the label list.
pub const LABEL_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEditor {
    pub pending: String,
}

impl LabelEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: String) {
        self.pending = value;
    }

    /// Append the pending label and clear the input.
    ///
    /// An empty label is only appended when the rules allow it; it is still
    /// cleared either way.
    pub fn add_to(&mut self, labels: &mut Vec<String>, rules: &ValidationRules) -> bool {
        let label = std::mem::take(&mut self.pending);
        if label.is_empty() && !rules.allow_empty_labels {
            return false;
        }
        labels.push(label);
        true
    }
}

/// Remove the first occurrence of `label`. Missing labels are a no-op.
pub fn remove_label(labels: &mut Vec<String>, label: &str) -> bool {
    match labels.iter().position(|l| l == label) {
        Some(index) => {
            labels.remove(index);
            true
        }
        None => false,
    }
}

/// Split the API representation; the empty string means no labels.
pub fn split_labels(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(LABEL_SEPARATOR).map(str::to_string).collect()
}

pub fn join_labels(labels: &[String]) -> String {
    labels.join(LABEL_SEPARATOR)
}
