//! DOM-like input elements shared between field state and the view layer

use crate::value::RawValue;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Semantic input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Password,
    Number,
    Email,
    Checkbox,
    Radio,
    File,
    Range,
    Textarea,
    SelectOne,
    SelectMultiple,
}

impl FieldKind {
    /// Canonical string name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::File => "file",
            FieldKind::Range => "range",
            FieldKind::Textarea => "textarea",
            FieldKind::SelectOne => "select-one",
            FieldKind::SelectMultiple => "select-multiple",
        }
    }

    /// Whether this kind carries a list of selectable options.
    pub fn is_select(self) -> bool {
        matches!(self, FieldKind::SelectOne | FieldKind::SelectMultiple)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a file chosen in a file field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHandle {
    pub name: String,
    pub path: PathBuf,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Build a handle from a path, using its file name for display.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }
}

/// One option of a select element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }
}

/// The kind of interaction that produced a field event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Change,
    Blur,
}

/// Data extracted from a change or blur interaction: the raw value plus the
/// `checked` and `files` element state, captured regardless of kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeData {
    pub value: RawValue,
    pub checked: bool,
    pub files: Option<Vec<FileHandle>>,
}

/// Mutable DOM-like input element the view layer writes into.
///
/// Components mutate `value`/`checked`/`files`/`options` in response to key
/// events and then raise a change event on their [`crate::state::Field`],
/// which re-extracts the raw data from here.
#[derive(Debug, Clone)]
pub struct Element {
    kind: FieldKind,
    name: String,
    pub value: String,
    pub checked: bool,
    pub files: Option<Vec<FileHandle>>,
    pub options: Vec<SelectOption>,
    pub multiple: bool,
    focused: bool,
}

impl Element {
    pub fn new(kind: FieldKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: String::new(),
            checked: false,
            files: None,
            options: Vec::new(),
            multiple: kind == FieldKind::SelectMultiple,
            focused: false,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Values of the currently selected options, in option order.
    pub fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.clone())
            .collect()
    }
}
