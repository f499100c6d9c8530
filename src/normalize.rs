//! Normalization of raw registry state into the submission payload

use crate::element::FieldKind;
use crate::markdown::MarkdownRenderer;
use crate::state::Registry;
use crate::value::{FormValue, RawValue};
use indexmap::IndexMap;

/// The normalized submission payload, keyed by field name in registration
/// order.
pub type FormData = IndexMap<String, FormValue>;

/// Pure transformation of the registry snapshot into the submission
/// payload, applying per-kind coercion rules. Fields whose value is excluded
/// by a rule are omitted from the result entirely.
pub fn normalize_form_data(registry: &Registry, markdown: &dyn MarkdownRenderer) -> FormData {
    let mut normalized = FormData::default();

    for (_, binding) in registry.iter() {
        let state = binding.state().borrow();
        let name = binding.name().to_string();

        match binding.kind() {
            FieldKind::Checkbox => {
                let trimmed = state.value.as_text().unwrap_or("").trim();
                let value = if trimmed.is_empty() { "on" } else { trimmed };
                if !value.is_empty() {
                    normalized.insert(name, FormValue::Text(value.to_string()));
                }
            }
            FieldKind::Radio => {
                if state.checked {
                    let trimmed = state.value.as_text().unwrap_or("").trim();
                    if !trimmed.is_empty() {
                        normalized.insert(name, FormValue::Text(trimmed.to_string()));
                    }
                }
            }
            FieldKind::File => {
                if let Some(files) = &state.files {
                    if !files.is_empty() {
                        normalized.insert(name, FormValue::Files(files.clone()));
                    }
                }
            }
            FieldKind::Range => {
                let trimmed = state.value.as_text().unwrap_or("").trim();
                if !trimmed.is_empty() {
                    normalized.insert(
                        name,
                        FormValue::Number(trimmed.parse().unwrap_or(f64::NAN)),
                    );
                }
            }
            FieldKind::Textarea => {
                let raw = state.value.as_text().unwrap_or("");
                if !raw.is_empty() {
                    normalized.insert(name, FormValue::Text(markdown.render(raw)));
                }
            }
            FieldKind::SelectOne | FieldKind::SelectMultiple => match &state.value {
                RawValue::Text(s) if !s.is_empty() => {
                    normalized.insert(name, FormValue::Text(s.clone()));
                }
                RawValue::List(items) if !items.is_empty() => {
                    normalized.insert(name, FormValue::List(items.clone()));
                }
                _ => {}
            },
            _ => {
                let trimmed = state.value.as_text().unwrap_or("").trim();
                if !trimmed.is_empty() {
                    normalized.insert(name, FormValue::Text(trimmed.to_string()));
                }
            }
        }
    }

    normalized
}
