//! Field validation: the falsy rule, the built-in required check and the
//! custom validator contract

use crate::element::{ChangeData, FieldKind};
use crate::state::Registry;
use crate::value::RawValue;
use std::rc::Rc;

/// Pluggable per-field validator.
///
/// Called with the candidate data, the field name and a read-only view of
/// the registry for cross-field checks. Runs only after the built-in
/// required check passed (or was not applicable); the returned message wins.
pub type Validator = Rc<dyn Fn(&ChangeData, &str, &Registry) -> Option<String>>;

/// Whether a field is required, and how the requirement is labeled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Requirement {
    #[default]
    No,
    Yes,
    /// Required, with a custom marker shown next to the label.
    Labeled(String),
}

impl Requirement {
    pub fn is_required(&self) -> bool {
        !matches!(self, Requirement::No)
    }

    /// The marker rendered next to the field label.
    pub fn marker(&self) -> &str {
        match self {
            Requirement::Labeled(marker) => marker,
            _ => "(Required)",
        }
    }
}

/// The uniform falsy rule: a list is falsy iff empty, `false` and `Null` are
/// falsy, text is falsy iff it trims to nothing. Every other value, numbers
/// zero and NaN included, is not falsy.
pub fn is_falsy(value: &RawValue) -> bool {
    match value {
        RawValue::List(items) => items.is_empty(),
        RawValue::Bool(b) => !b,
        RawValue::Null => true,
        RawValue::Text(s) => s.trim().is_empty(),
        RawValue::Number(_) => false,
    }
}

/// The built-in required check, dispatched by the semantic kind of the
/// target field.
pub fn required_validator(candidate: &ChangeData, kind: FieldKind) -> Option<String> {
    match kind {
        FieldKind::Checkbox => {
            if is_falsy(&RawValue::Bool(candidate.checked)) {
                Some("Please select this field".to_string())
            } else {
                None
            }
        }
        FieldKind::File => {
            let empty = candidate.files.as_ref().map_or(true, |files| files.is_empty());
            if empty {
                Some("Please choose one or more files".to_string())
            } else {
                None
            }
        }
        FieldKind::Range => {
            if is_falsy(&candidate.value) {
                Some("Please select a number in this range".to_string())
            } else {
                None
            }
        }
        FieldKind::SelectMultiple => {
            if is_falsy(&candidate.value) {
                Some("Please choose on or more options".to_string())
            } else {
                None
            }
        }
        _ => {
            if is_falsy(&candidate.value) {
                Some("Please fill in this field".to_string())
            } else {
                None
            }
        }
    }
}
