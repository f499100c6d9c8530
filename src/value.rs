//! Raw and normalized field value objects

use crate::element::FileHandle;
use serde::Serialize;

/// A raw per-field value as captured from an input element.
///
/// This is the uniform currency of field state, candidate validation values
/// and the falsy rule in [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl RawValue {
    /// Get the text value, if this is a `Text` variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the list items, if this is a `List` variant.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            RawValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Plain boolean coercion, used when picking initial values from
    /// configured defaults. Unlike [`crate::validate::is_falsy`], zero and
    /// NaN count as false here and whitespace-only text counts as true.
    pub(crate) fn is_truthy(&self) -> bool {
        match self {
            RawValue::Null => false,
            RawValue::Bool(b) => *b,
            RawValue::Number(n) => *n != 0.0 && !n.is_nan(),
            RawValue::Text(s) => !s.is_empty(),
            RawValue::List(_) => true,
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Text(String::new())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        RawValue::List(items)
    }
}

/// Make sure the given raw value is a `List`.
///
/// Untruthy scalars become an empty list, lists pass through unchanged and
/// any other scalar is wrapped as a one-element list.
pub fn ensure_array(input: &RawValue) -> RawValue {
    match input {
        RawValue::List(_) => input.clone(),
        v if !v.is_truthy() => RawValue::List(Vec::new()),
        RawValue::Text(s) => RawValue::List(vec![s.clone()]),
        RawValue::Number(n) => RawValue::List(vec![n.to_string()]),
        RawValue::Bool(b) => RawValue::List(vec![b.to_string()]),
        RawValue::Null => RawValue::List(Vec::new()),
    }
}

/// A normalized output value in the submission payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
    Files(Vec<FileHandle>),
}

impl FormValue {
    /// Get the text value, if this is a `Text` variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric value, if this is a `Number` variant.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}
