//! Form serialization rules for the filter form.
//!
//! The browser adapter reads each control into a [`FormField`]; the rules
//! deciding what ends up in the query live here.

use crate::query::QueryParams;

/// Control kinds that matter for serialization and reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text (`text`, `search`, `number`, `date`, `textarea`, ...).
    Text,
    Checkbox,
    Radio,
    Select,
    Hidden,
    /// Buttons and file inputs, never serialized.
    Ignored,
}

impl FieldKind {
    /// Kind of an `<input>` from its `type` attribute.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "hidden" => Self::Hidden,
            "submit" | "button" | "reset" | "image" | "file" => Self::Ignored,
            _ => Self::Text,
        }
    }
}

/// Snapshot of one form control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            checked: false,
            disabled: false,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Pair contributed to the query, if any.
    pub fn entry(&self) -> Option<(&str, &str)> {
        if self.name.is_empty() || self.disabled {
            return None;
        }
        match self.kind {
            FieldKind::Ignored => None,
            FieldKind::Checkbox | FieldKind::Radio if !self.checked => None,
            _ => Some((self.name.as_str(), self.value.as_str())),
        }
    }

    /// What a form reset does to this control.
    pub fn reset_action(&self) -> ResetAction {
        match self.kind {
            FieldKind::Checkbox | FieldKind::Radio => ResetAction::Uncheck,
            FieldKind::Text | FieldKind::Select => ResetAction::Blank,
            FieldKind::Hidden | FieldKind::Ignored => ResetAction::Keep,
        }
    }
}

/// Effect of a reset on one control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetAction {
    Uncheck,
    Blank,
    Keep,
}

/// Query parameters for a form, in document order.
pub fn collect_params<'a>(fields: impl IntoIterator<Item = &'a FormField>) -> QueryParams {
    fields.into_iter().filter_map(FormField::entry).collect()
}
