//! Per-field state unit: value/checked/files/error/touched plus the
//! change/blur/validate/reset operations

use crate::element::{ChangeData, Element, EventKind, FieldKind, FileHandle, SelectOption};
use crate::state::registry::{binding_key, Registry};
use crate::validate::{required_validator, Requirement, Validator};
use crate::value::{ensure_array, RawValue};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Configuration of a single form field.
#[derive(Clone)]
pub struct FieldConfig {
    pub name: String,
    pub kind: FieldKind,
    pub label: Option<String>,
    pub help_text: Option<String>,
    pub placeholder: Option<String>,
    pub default_value: Option<RawValue>,
    pub default_checked: bool,
    pub required: Requirement,
    pub multiple: bool,
    pub options: Vec<SelectOption>,
    pub validator: Option<Validator>,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            help_text: None,
            placeholder: None,
            default_value: None,
            default_checked: false,
            required: Requirement::default(),
            multiple: kind == FieldKind::SelectMultiple,
            options: Vec::new(),
            validator: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<RawValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn default_checked(mut self, checked: bool) -> Self {
        self.default_checked = checked;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = Requirement::Yes;
        self
    }

    /// Mark as required with a custom marker next to the label.
    pub fn required_with(mut self, marker: impl Into<String>) -> Self {
        self.required = Requirement::Labeled(marker.into());
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn validator(
        mut self,
        validator: impl Fn(&ChangeData, &str, &Registry) -> Option<String> + 'static,
    ) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("multiple", &self.multiple)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// Live state of one mounted field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub value: RawValue,
    pub checked: bool,
    pub files: Option<Vec<FileHandle>>,
    pub error: Option<String>,
    pub touched: bool,
}

impl FieldState {
    /// Initial state, computed from the config's current defaults.
    pub(crate) fn initial(config: &FieldConfig) -> Self {
        let value = if config.multiple {
            ensure_array(config.default_value.as_ref().unwrap_or(&RawValue::Null))
        } else {
            match &config.default_value {
                Some(default) if default.is_truthy() => default.clone(),
                _ => RawValue::Text(String::new()),
            }
        };
        Self {
            value,
            checked: config.default_checked,
            files: None,
            error: None,
            touched: false,
        }
    }
}

/// Extract `{value, checked, files}` from an interaction.
///
/// Blur events report the stored state, which is authoritative; the live
/// element is never re-read on blur. Change events read the element: a
/// select collects its chosen option values into an ordered list, unwrapped
/// to a scalar when exactly one is chosen on a non-multiple select; any
/// other kind reports the raw value string. `checked` and `files` are
/// captured from the element regardless of kind.
pub fn data_from_event(event: EventKind, element: &Element, state: &FieldState) -> ChangeData {
    if event == EventKind::Blur {
        return ChangeData {
            value: state.value.clone(),
            checked: state.checked,
            files: state.files.clone(),
        };
    }

    let value = if element.kind().is_select() {
        let selected = element.selected_values();
        if selected.len() == 1 && !element.multiple {
            RawValue::Text(selected[0].clone())
        } else {
            RawValue::List(selected)
        }
    } else {
        RawValue::Text(element.value.clone())
    };

    ChangeData {
        value,
        checked: element.checked,
        files: element.files.clone(),
    }
}

/// Push stored field state back into the element so the view reflects it.
fn apply_state_to_element(element: &mut Element, state: &FieldState) {
    element.value = match &state.value {
        RawValue::Text(s) => s.clone(),
        RawValue::List(items) => items.first().cloned().unwrap_or_default(),
        RawValue::Number(n) => n.to_string(),
        RawValue::Bool(b) => b.to_string(),
        RawValue::Null => String::new(),
    };
    if element.kind().is_select() {
        let selected: Vec<String> = match &state.value {
            RawValue::Text(s) if !s.is_empty() => vec![s.clone()],
            RawValue::List(items) => items.clone(),
            _ => Vec::new(),
        };
        for option in &mut element.options {
            option.selected = selected.contains(&option.value);
        }
    }
    element.checked = state.checked;
    element.files = state.files.clone();
}

fn run_validators(
    config: &FieldConfig,
    candidate: &ChangeData,
    registry: Option<&Registry>,
) -> Option<String> {
    let mut error = None;
    if config.required.is_required() {
        error = required_validator(candidate, config.kind);
    }
    if error.is_none() {
        if let (Some(validator), Some(registry)) = (&config.validator, registry) {
            error = validator(candidate, &config.name, registry);
        }
    }
    error
}

/// Live record tying a mounted field to its state and element.
///
/// The registry holds a clone of the binding; all handles are shared by
/// reference, so field mutations are visible through the registry without
/// any re-sync step.
#[derive(Clone)]
pub struct FieldBinding {
    config: Rc<FieldConfig>,
    state: Rc<RefCell<FieldState>>,
    element: Rc<RefCell<Element>>,
}

impl FieldBinding {
    pub fn kind(&self) -> FieldKind {
        self.config.kind
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> &Rc<RefCell<FieldState>> {
        &self.state
    }

    pub fn element(&self) -> &Rc<RefCell<Element>> {
        &self.element
    }

    /// Candidate data built from the stored state, as used at submit time.
    pub fn candidate(&self) -> ChangeData {
        let state = self.state.borrow();
        ChangeData {
            value: state.value.clone(),
            checked: state.checked,
            files: state.files.clone(),
        }
    }

    /// Re-derive the field error from the required state and any custom
    /// validator. The first non-null message wins and is stored in `error`;
    /// `force_touched` also marks the field touched. Returns the message.
    pub fn validate(
        &self,
        candidate: &ChangeData,
        force_touched: bool,
        registry: Option<&Registry>,
    ) -> Option<String> {
        let error = run_validators(&self.config, candidate, registry);
        {
            let mut state = self.state.borrow_mut();
            state.error = error.clone();
            if force_touched {
                state.touched = true;
            }
        }
        tracing::debug!(field = %self.config.name, valid = error.is_none(), "validated field");
        error
    }

    /// Restore value/checked/files/error/touched to initial defaults. The
    /// defaults are re-evaluated from the config, not cached.
    pub fn reset(&self) {
        let state = FieldState::initial(&self.config);
        apply_state_to_element(&mut self.element.borrow_mut(), &state);
        *self.state.borrow_mut() = state;
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.config.name)
            .field("kind", &self.config.kind)
            .field("state", &self.state.borrow())
            .finish()
    }
}

/// Stateful handle owned by a visual component for one mounted field.
///
/// Construction registers the field in the form's registry; dropping the
/// handle unregisters it, so the registry never holds a binding for an
/// unmounted field.
pub struct Field {
    key: String,
    binding: FieldBinding,
    registry: Weak<RefCell<Registry>>,
}

impl Field {
    pub(crate) fn register(registry: &Rc<RefCell<Registry>>, config: FieldConfig) -> Self {
        let config = Rc::new(config);
        let state = FieldState::initial(&config);
        let key = binding_key(&config.name, config.kind, &state.value);

        let mut element = Element::new(config.kind, config.name.clone());
        element.options = config.options.clone();
        element.multiple = config.multiple || config.kind == FieldKind::SelectMultiple;
        apply_state_to_element(&mut element, &state);

        let binding = FieldBinding {
            config: Rc::clone(&config),
            state: Rc::new(RefCell::new(state)),
            element: Rc::new(RefCell::new(element)),
        };
        registry.borrow_mut().register(key.clone(), binding.clone());
        tracing::debug!(field = %key, kind = %config.kind, "registered field");

        Self {
            key,
            binding,
            registry: Rc::downgrade(registry),
        }
    }

    /// Registry key of this field (`"name.value"` for radio members).
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        self.binding.name()
    }

    pub fn kind(&self) -> FieldKind {
        self.binding.kind()
    }

    pub fn config(&self) -> &FieldConfig {
        self.binding.config()
    }

    pub fn state(&self) -> Ref<'_, FieldState> {
        self.binding.state().borrow()
    }

    /// Current validation message, if any.
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn is_touched(&self) -> bool {
        self.state().touched
    }

    /// Shared handle to the underlying element for the view layer.
    pub fn element(&self) -> Rc<RefCell<Element>> {
        Rc::clone(self.binding.element())
    }

    pub fn binding(&self) -> &FieldBinding {
        &self.binding
    }

    /// Handle a change interaction: extract raw data from the element,
    /// store it, re-validate and notify the form-level change observer.
    pub fn on_change(&self) {
        let data = {
            let element = self.binding.element().borrow();
            let state = self.binding.state().borrow();
            data_from_event(EventKind::Change, &element, &state)
        };
        {
            let mut state = self.binding.state().borrow_mut();
            state.value = data.value.clone();
            state.checked = data.checked;
            state.files = data.files.clone();
        }
        self.validate(&data, false);
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow().notify_update(self.name(), &data);
        }
    }

    /// Handle a blur interaction: mark touched (idempotent) and re-validate
    /// from the stored state.
    pub fn on_blur(&self) {
        {
            let mut state = self.binding.state().borrow_mut();
            if !state.touched {
                state.touched = true;
            }
        }
        let data = {
            let element = self.binding.element().borrow();
            let state = self.binding.state().borrow();
            data_from_event(EventKind::Blur, &element, &state)
        };
        self.validate(&data, false);
    }

    /// Validate a candidate state against this field's configuration.
    pub fn validate(&self, candidate: &ChangeData, force_touched: bool) -> Option<String> {
        match self.registry.upgrade() {
            Some(registry) => {
                let registry = registry.borrow();
                self.binding
                    .validate(candidate, force_touched, Some(&*registry))
            }
            None => self.binding.validate(candidate, force_touched, None),
        }
    }

    /// Restore this field to its initial defaults.
    pub fn reset(&self) {
        self.binding.reset();
    }
}

impl Drop for Field {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().unregister(&self.key);
            tracing::debug!(field = %self.key, "unregistered field");
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("binding", &self.binding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Form;

    fn text_field(form: &Form, name: &str) -> Field {
        form.field(FieldConfig::new(name, FieldKind::Text))
    }

    mod initial_state {
        use super::*;

        #[test]
        fn test_defaults_for_plain_text_field() {
            let form = Form::new();
            let field = text_field(&form, "title");
            let state = field.state();
            assert_eq!(state.value, RawValue::Text(String::new()));
            assert!(!state.checked);
            assert!(state.files.is_none());
            assert!(state.error.is_none());
            assert!(!state.touched);
        }

        #[test]
        fn test_default_value_is_used_when_truthy() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("title", FieldKind::Text).default_value("hello"),
            );
            assert_eq!(field.state().value, RawValue::Text("hello".to_string()));
        }

        #[test]
        fn test_empty_default_value_falls_back_to_empty_text() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("title", FieldKind::Text).default_value(""));
            assert_eq!(field.state().value, RawValue::Text(String::new()));
        }

        #[test]
        fn test_multiple_wraps_default_into_a_list() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("tags", FieldKind::SelectMultiple).default_value("a"),
            );
            assert_eq!(
                field.state().value,
                RawValue::List(vec!["a".to_string()])
            );
        }

        #[test]
        fn test_multiple_without_default_is_an_empty_list() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("tags", FieldKind::SelectMultiple));
            assert_eq!(field.state().value, RawValue::List(Vec::new()));
        }

        #[test]
        fn test_default_checked_is_applied() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("accept", FieldKind::Checkbox).default_checked(true),
            );
            assert!(field.state().checked);
        }

        #[test]
        fn test_element_reflects_initial_state() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("title", FieldKind::Text).default_value("hello"),
            );
            assert_eq!(field.element().borrow().value, "hello");
        }
    }

    mod registration {
        use super::*;

        #[test]
        fn test_field_registers_on_construction() {
            let form = Form::new();
            let _field = text_field(&form, "title");
            assert!(form.registry().borrow().contains("title"));
        }

        #[test]
        fn test_radio_fields_are_keyed_by_name_and_value() {
            let form = Form::new();
            let _red = form.field(
                FieldConfig::new("color", FieldKind::Radio).default_value("red"),
            );
            let _blue = form.field(
                FieldConfig::new("color", FieldKind::Radio).default_value("blue"),
            );
            let registry = form.registry();
            let registry = registry.borrow();
            assert!(registry.contains("color.red"));
            assert!(registry.contains("color.blue"));
            assert_eq!(registry.len(), 2);
        }

        #[test]
        fn test_drop_unregisters() {
            let form = Form::new();
            {
                let _field = text_field(&form, "title");
                assert_eq!(form.registry().borrow().len(), 1);
            }
            assert!(form.registry().borrow().is_empty());
        }

        #[test]
        fn test_remount_overwrites_without_error() {
            let form = Form::new();
            let _first = text_field(&form, "title");
            let second = form.field(
                FieldConfig::new("title", FieldKind::Text).default_value("v2"),
            );
            let registry = form.registry();
            let registry = registry.borrow();
            assert_eq!(registry.len(), 1);
            let binding = registry.get("title").unwrap();
            assert_eq!(
                binding.state().borrow().value,
                RawValue::Text("v2".to_string())
            );
            drop(registry);
            drop(second);
        }

        #[test]
        fn test_registration_order_is_preserved() {
            let form = Form::new();
            let _a = text_field(&form, "a");
            let _b = text_field(&form, "b");
            let _c = text_field(&form, "c");
            let registry = form.registry();
            let keys: Vec<String> = registry.borrow().keys().cloned().collect();
            assert_eq!(keys, vec!["a", "b", "c"]);
        }
    }

    mod event_extraction {
        use super::*;

        #[test]
        fn test_change_reads_the_raw_value_string() {
            let form = Form::new();
            let field = text_field(&form, "title");
            field.element().borrow_mut().value = "typed".to_string();
            field.on_change();
            assert_eq!(field.state().value, RawValue::Text("typed".to_string()));
        }

        #[test]
        fn test_change_on_single_select_unwraps_one_choice() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("pet", FieldKind::SelectOne).options(vec![
                SelectOption::new("cat", "Cat"),
                SelectOption::new("dog", "Dog"),
            ]));
            field.element().borrow_mut().options[1].selected = true;
            field.on_change();
            assert_eq!(field.state().value, RawValue::Text("dog".to_string()));
        }

        #[test]
        fn test_change_on_single_select_with_no_choice_is_an_empty_list() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("pet", FieldKind::SelectOne)
                    .options(vec![SelectOption::new("cat", "Cat")]),
            );
            field.on_change();
            assert_eq!(field.state().value, RawValue::List(Vec::new()));
        }

        #[test]
        fn test_change_on_multi_select_keeps_the_list() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("tags", FieldKind::SelectMultiple).options(
                vec![
                    SelectOption::new("a", "A"),
                    SelectOption::new("b", "B"),
                ],
            ));
            {
                let element = field.element();
                let mut element = element.borrow_mut();
                element.options[0].selected = true;
                element.options[1].selected = true;
            }
            field.on_change();
            assert_eq!(
                field.state().value,
                RawValue::List(vec!["a".to_string(), "b".to_string()])
            );
        }

        #[test]
        fn test_single_selection_on_multi_select_stays_a_list() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("tags", FieldKind::SelectMultiple)
                    .options(vec![SelectOption::new("a", "A")]),
            );
            field.element().borrow_mut().options[0].selected = true;
            field.on_change();
            assert_eq!(field.state().value, RawValue::List(vec!["a".to_string()]));
        }

        #[test]
        fn test_change_captures_checked_and_files() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("upload", FieldKind::File));
            {
                let element = field.element();
                let mut element = element.borrow_mut();
                element.checked = true;
                element.files = Some(vec![FileHandle::from_path("/tmp/a.txt")]);
            }
            field.on_change();
            let state = field.state();
            assert!(state.checked);
            assert_eq!(state.files.as_ref().unwrap().len(), 1);
        }

        #[test]
        fn test_blur_reports_stored_state_not_the_element() {
            let form = Form::new();
            let field = text_field(&form, "title");
            field.element().borrow_mut().value = "stored".to_string();
            field.on_change();
            // Out-of-band element mutation must not leak into blur handling
            field.element().borrow_mut().value = "diverged".to_string();
            field.on_blur();
            assert_eq!(field.state().value, RawValue::Text("stored".to_string()));
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_change_sets_error_for_required_empty_field() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("title", FieldKind::Text).required());
            field.on_change();
            assert_eq!(
                field.error().as_deref(),
                Some("Please fill in this field")
            );
        }

        #[test]
        fn test_change_clears_error_once_filled() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("title", FieldKind::Text).required());
            field.on_change();
            assert!(field.error().is_some());
            field.element().borrow_mut().value = "x".to_string();
            field.on_change();
            assert!(field.error().is_none());
        }

        #[test]
        fn test_custom_validator_runs_after_required_check() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("title", FieldKind::Text)
                    .required()
                    .validator(|data, _, _| {
                        let text = data.value.as_text().unwrap_or("");
                        (text.len() < 3).then(|| "Too short".to_string())
                    }),
            );
            // Required failure wins; the custom validator is not consulted
            field.on_change();
            assert_eq!(field.error().as_deref(), Some("Please fill in this field"));

            field.element().borrow_mut().value = "ab".to_string();
            field.on_change();
            assert_eq!(field.error().as_deref(), Some("Too short"));

            field.element().borrow_mut().value = "abc".to_string();
            field.on_change();
            assert!(field.error().is_none());
        }

        #[test]
        fn test_custom_validator_sees_sibling_fields() {
            let form = Form::new();
            let password = form.field(
                FieldConfig::new("password", FieldKind::Password).default_value("secret"),
            );
            let confirm = form.field(
                FieldConfig::new("confirm", FieldKind::Password).validator(|data, _, registry| {
                    let other = registry.get("password")?.candidate();
                    (data.value != other.value).then(|| "Passwords do not match".to_string())
                }),
            );
            confirm.element().borrow_mut().value = "nope".to_string();
            confirm.on_change();
            assert_eq!(confirm.error().as_deref(), Some("Passwords do not match"));

            confirm.element().borrow_mut().value = "secret".to_string();
            confirm.on_change();
            assert!(confirm.error().is_none());
            drop(password);
        }

        #[test]
        fn test_blur_marks_touched_idempotently() {
            let form = Form::new();
            let field = text_field(&form, "title");
            assert!(!field.is_touched());
            field.on_blur();
            assert!(field.is_touched());
            field.on_blur();
            assert!(field.is_touched());
        }

        #[test]
        fn test_force_touched_marks_the_field() {
            let form = Form::new();
            let field = text_field(&form, "title");
            let candidate = field.binding().candidate();
            field.validate(&candidate, true);
            assert!(field.is_touched());
        }

        #[test]
        fn test_unrequired_field_without_validator_never_errors() {
            let form = Form::new();
            let field = text_field(&form, "title");
            field.on_change();
            assert!(field.error().is_none());
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn test_reset_restores_freshly_constructed_state() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("title", FieldKind::Text)
                    .default_value("initial")
                    .required(),
            );
            let fresh = field.state().clone();

            field.element().borrow_mut().value = String::new();
            field.on_change();
            field.on_blur();
            assert!(field.state().touched);
            assert!(field.state().error.is_some());

            field.reset();
            assert_eq!(*field.state(), fresh);
            assert_eq!(field.element().borrow().value, "initial");
        }

        #[test]
        fn test_reset_clears_files_and_checked() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("upload", FieldKind::File));
            field.element().borrow_mut().files = Some(vec![FileHandle::from_path("/tmp/a")]);
            field.on_change();
            assert!(field.state().files.is_some());

            field.reset();
            assert!(field.state().files.is_none());
            assert!(field.element().borrow().files.is_none());
        }

        #[test]
        fn test_reset_restores_default_option_selection() {
            let form = Form::new();
            let field = form.field(
                FieldConfig::new("pet", FieldKind::SelectOne)
                    .default_value("cat")
                    .options(vec![
                        SelectOption::new("cat", "Cat"),
                        SelectOption::new("dog", "Dog"),
                    ]),
            );
            {
                let element = field.element();
                let mut element = element.borrow_mut();
                element.options[0].selected = false;
                element.options[1].selected = true;
            }
            field.on_change();
            assert_eq!(field.state().value, RawValue::Text("dog".to_string()));

            field.reset();
            let element = field.element();
            let element = element.borrow();
            assert!(element.options[0].selected);
            assert!(!element.options[1].selected);
        }
    }
}
