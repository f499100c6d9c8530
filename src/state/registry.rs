//! Shared field registry, scoped to one form instance

use crate::element::{ChangeData, FieldKind};
use crate::state::field::FieldBinding;
use crate::value::RawValue;
use indexmap::IndexMap;
use std::fmt;

/// Observer invoked on every field edit with `(name, data)`.
pub type ChangeObserver = Box<dyn Fn(&str, &ChangeData)>;

/// Registry key for a field: radio-kind fields are keyed `"name.value"` so
/// that group members sharing a name get independent bindings, everything
/// else is keyed by name alone.
pub fn binding_key(name: &str, kind: FieldKind, value: &RawValue) -> String {
    if kind == FieldKind::Radio {
        format!("{name}.{}", value.as_text().unwrap_or(""))
    } else {
        name.to_string()
    }
}

/// Mutable mapping from field key to its live binding.
///
/// Iteration order is registration order; submit-time validation and
/// normalization both rely on it. Exclusively owned by the form container
/// for its lifetime; fields hold weak back-references.
#[derive(Default)]
pub struct Registry {
    fields: IndexMap<String, FieldBinding>,
    on_update: Option<ChangeObserver>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a binding. A duplicate key is not an error; the
    /// last write wins, which models a field remount.
    pub fn register(&mut self, key: impl Into<String>, binding: FieldBinding) {
        self.fields.insert(key.into(), binding);
    }

    /// Remove a binding. Absent keys are ignored.
    pub fn unregister(&mut self, key: &str) {
        self.fields.shift_remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&FieldBinding> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldBinding)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn set_observer(&mut self, observer: ChangeObserver) {
        self.on_update = Some(observer);
    }

    /// Forward a field edit to the form-level change observer, if any.
    pub fn notify_update(&self, name: &str, data: &ChangeData) {
        if let Some(observer) = &self.on_update {
            observer(name, data);
        }
    }

    /// Move focus to the keyed field's element, clearing it everywhere else.
    pub fn focus_field(&self, key: &str) {
        for (candidate, binding) in &self.fields {
            let mut element = binding.element().borrow_mut();
            if candidate == key {
                element.focus();
            } else {
                element.blur();
            }
        }
    }

    /// Key of the currently focused field, if any.
    pub fn focused_field(&self) -> Option<String> {
        self.fields
            .iter()
            .find(|(_, binding)| binding.element().borrow().is_focused())
            .map(|(key, _)| key.clone())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("has_observer", &self.on_update.is_some())
            .finish()
    }
}
