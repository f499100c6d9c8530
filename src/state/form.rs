//! Form container: owns the registry, drives submit/reset orchestration and
//! holds form-level status

use crate::element::ChangeData;
use crate::error::FormError;
use crate::markdown::{MarkdownRenderer, PulldownRenderer};
use crate::normalize::{normalize_form_data, FormData};
use crate::state::field::{Field, FieldConfig};
use crate::state::registry::Registry;
use anyhow::Result;
use async_trait::async_trait;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Trait for the submit callback, enabling mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Called once per successful submit with the normalized form data.
    async fn on_submit(&mut self, data: FormData) -> Result<()>;
}

/// Form-level submit state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormStatus {
    /// Message of the first failing field from the last submit, if any.
    pub error: Option<String>,
    pub success: bool,
    pub is_submitting: bool,
}

/// Outcome of one submit cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field validated; carries the normalized form data that was
    /// handed to the submit handler.
    Submitted(FormData),
    /// Validation stopped at the first failing field, which received focus.
    Rejected { field: String, message: String },
}

/// The form container.
///
/// Owns the field registry for its lifetime and hands out [`Field`] handles
/// that register themselves into it. All state transitions run on the caller
/// thread; the only suspension point is awaiting the submit handler.
pub struct Form {
    registry: Rc<RefCell<Registry>>,
    status: FormStatus,
    handler: Option<Box<dyn SubmitHandler>>,
    markdown: Box<dyn MarkdownRenderer>,
}

impl Form {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
            status: FormStatus::default(),
            handler: None,
            markdown: Box::new(PulldownRenderer),
        }
    }

    /// Set the submit handler invoked with the normalized data.
    pub fn on_submit(&mut self, handler: impl SubmitHandler + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Set the observer invoked as `(name, data)` on every field edit.
    pub fn on_change(&mut self, observer: impl Fn(&str, &ChangeData) + 'static) {
        self.registry.borrow_mut().set_observer(Box::new(observer));
    }

    /// Replace the markdown renderer used for textarea normalization.
    pub fn with_markdown_renderer(mut self, renderer: impl MarkdownRenderer + 'static) -> Self {
        self.markdown = Box::new(renderer);
        self
    }

    /// Create a field registered into this form.
    pub fn field(&self, config: FieldConfig) -> Field {
        Field::register(&self.registry, config)
    }

    /// Shared handle to the registry for snapshot reads.
    pub fn registry(&self) -> Rc<RefCell<Registry>> {
        Rc::clone(&self.registry)
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Key of the field whose element currently has focus, if any.
    pub fn focused_field(&self) -> Option<String> {
        self.registry.borrow().focused_field()
    }

    /// The renderer used for textarea previews and normalization.
    pub fn markdown(&self) -> &dyn MarkdownRenderer {
        self.markdown.as_ref()
    }

    /// Run a full submit cycle.
    ///
    /// Validates every field in registration order, stopping at the first
    /// error; on failure the offending field is focused and the handler is
    /// not invoked. On success the normalized data is passed to the handler
    /// (awaited inline) and returned in the outcome. A handler failure
    /// propagates before the success-status update. A submit while one is
    /// already in flight is rejected.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        if self.status.is_submitting {
            return Err(FormError::SubmitInProgress);
        }
        self.status.is_submitting = true;

        let mut failure: Option<(String, String)> = None;
        {
            let registry = self.registry.borrow();
            for (key, binding) in registry.iter() {
                let candidate = binding.candidate();
                if let Some(message) = binding.validate(&candidate, true, Some(&*registry)) {
                    failure = Some((key.clone(), message));
                    break;
                }
            }
        }

        if let Some((key, message)) = failure {
            self.status.error = Some(message.clone());
            self.status.success = false;
            self.status.is_submitting = false;
            self.registry.borrow().focus_field(&key);
            tracing::warn!(field = %key, error = %message, "submit rejected");
            return Ok(SubmitOutcome::Rejected {
                field: key,
                message,
            });
        }

        let data = {
            let registry = self.registry.borrow();
            normalize_form_data(&registry, self.markdown.as_ref())
        };
        if let Some(handler) = self.handler.as_mut() {
            handler
                .on_submit(data.clone())
                .await
                .map_err(FormError::Handler)?;
        }
        self.status.error = None;
        self.status.success = true;
        self.status.is_submitting = false;
        tracing::info!(fields = data.len(), "form submitted");
        Ok(SubmitOutcome::Submitted(data))
    }

    /// Restore every registered field to its defaults and clear the
    /// form-level status.
    pub fn reset(&mut self) {
        for (_, binding) in self.registry.borrow().iter() {
            binding.reset();
        }
        self.status = FormStatus::default();
        tracing::debug!("form reset");
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("registry", &self.registry.borrow())
            .field("status", &self.status)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{FieldKind, FileHandle};
    use crate::value::{FormValue, RawValue};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fill(field: &Field, value: &str) {
        field.element().borrow_mut().value = value.to_string();
        field.on_change();
    }

    mod submit {
        use super::*;

        #[tokio::test]
        async fn test_blank_required_field_rejects_the_submit() {
            let mut form = Form::new();
            let _field = form.field(FieldConfig::new("title", FieldKind::Text).required());

            let outcome = form.submit().await.unwrap();
            assert_eq!(
                outcome,
                SubmitOutcome::Rejected {
                    field: "title".to_string(),
                    message: "Please fill in this field".to_string(),
                }
            );
            let status = form.status();
            assert_eq!(status.error.as_deref(), Some("Please fill in this field"));
            assert!(!status.success);
            assert!(!status.is_submitting);
        }

        #[tokio::test]
        async fn test_first_failing_field_wins_and_is_focused() {
            let mut form = Form::new();
            let _a = form.field(FieldConfig::new("a", FieldKind::Text).required());
            let b = form.field(FieldConfig::new("b", FieldKind::Text).required());
            let _c = form.field(FieldConfig::new("c", FieldKind::Text).required());
            fill(&b, "filled");

            let outcome = form.submit().await.unwrap();
            match outcome {
                SubmitOutcome::Rejected { field, .. } => assert_eq!(field, "a"),
                other => panic!("expected rejection, got {other:?}"),
            }
            assert_eq!(form.focused_field().as_deref(), Some("a"));
        }

        #[tokio::test]
        async fn test_submit_force_touches_validated_fields() {
            let mut form = Form::new();
            let a = form.field(FieldConfig::new("a", FieldKind::Text).required());
            let c = form.field(FieldConfig::new("c", FieldKind::Text).required());

            let _ = form.submit().await.unwrap();
            // Validation stops at the first failure; later fields stay untouched
            assert!(a.is_touched());
            assert!(!c.is_touched());
        }

        #[tokio::test]
        async fn test_successful_submit_passes_normalized_data_to_the_handler() {
            let mut form = Form::new();
            let mut handler = MockSubmitHandler::new();
            handler
                .expect_on_submit()
                .withf(|data| {
                    data.len() == 1
                        && data.get("title") == Some(&FormValue::Text("hello".to_string()))
                })
                .times(1)
                .returning(|_| Ok(()));
            form.on_submit(handler);

            let field = form.field(FieldConfig::new("title", FieldKind::Text).required());
            fill(&field, "hello");

            let outcome = form.submit().await.unwrap();
            assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
            assert!(form.status().success);
            assert_eq!(form.status().error, None);
            assert!(!form.status().is_submitting);
        }

        #[tokio::test]
        async fn test_rejected_submit_does_not_invoke_the_handler() {
            let mut form = Form::new();
            let mut handler = MockSubmitHandler::new();
            handler.expect_on_submit().times(0);
            form.on_submit(handler);

            let _field = form.field(FieldConfig::new("title", FieldKind::Text).required());
            let outcome = form.submit().await.unwrap();
            assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
        }

        #[tokio::test]
        async fn test_submit_without_handler_still_returns_the_data() {
            let mut form = Form::new();
            let field = form.field(FieldConfig::new("title", FieldKind::Text));
            fill(&field, "  padded  ");

            match form.submit().await.unwrap() {
                SubmitOutcome::Submitted(data) => {
                    assert_eq!(data.get("title"), Some(&FormValue::Text("padded".to_string())));
                }
                other => panic!("expected submission, got {other:?}"),
            }
            assert!(form.status().success);
        }

        #[tokio::test]
        async fn test_handler_failure_propagates() {
            let mut form = Form::new();
            let mut handler = MockSubmitHandler::new();
            handler
                .expect_on_submit()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("backend unavailable")));
            form.on_submit(handler);

            let field = form.field(FieldConfig::new("title", FieldKind::Text));
            fill(&field, "x");

            let error = form.submit().await.unwrap_err();
            assert!(matches!(error, FormError::Handler(_)));
            // The success-status update is skipped on the failure path
            assert!(form.status().is_submitting);
            assert!(!form.status().success);
        }

        #[tokio::test]
        async fn test_reentrant_submit_is_rejected() {
            let mut form = Form::new();
            let field = form.field(FieldConfig::new("title", FieldKind::Text));
            fill(&field, "x");
            form.status.is_submitting = true;

            let error = form.submit().await.unwrap_err();
            assert!(matches!(error, FormError::SubmitInProgress));
        }

        #[tokio::test]
        async fn test_empty_form_submits_with_empty_data() {
            let mut form = Form::new();
            match form.submit().await.unwrap() {
                SubmitOutcome::Submitted(data) => assert!(data.is_empty()),
                other => panic!("expected submission, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_end_to_end_fix_and_resubmit() {
            let mut form = Form::new();
            let field = form.field(FieldConfig::new("title", FieldKind::Text).required());

            let outcome = form.submit().await.unwrap();
            assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
            assert!(form.status().error.is_some());
            assert!(!form.status().success);

            fill(&field, "value");
            match form.submit().await.unwrap() {
                SubmitOutcome::Submitted(data) => {
                    assert_eq!(data.get("title"), Some(&FormValue::Text("value".to_string())));
                }
                other => panic!("expected submission, got {other:?}"),
            }
            assert!(form.status().success);
        }
    }

    mod reset {
        use super::*;

        #[tokio::test]
        async fn test_reset_restores_fields_and_status() {
            let mut form = Form::new();
            let title = form.field(
                FieldConfig::new("title", FieldKind::Text).default_value("draft"),
            );
            let upload = form.field(FieldConfig::new("upload", FieldKind::File).required());
            fill(&title, "edited");
            upload.element().borrow_mut().files = Some(vec![FileHandle::from_path("/tmp/a")]);
            upload.on_change();

            let _ = form.submit().await;
            form.reset();

            assert_eq!(title.state().value, RawValue::Text("draft".to_string()));
            assert!(upload.state().files.is_none());
            assert_eq!(*form.status(), FormStatus::default());
        }

        #[test]
        fn test_reset_on_empty_form_is_a_noop() {
            let mut form = Form::new();
            form.reset();
            assert_eq!(*form.status(), FormStatus::default());
        }
    }

    mod change_observer {
        use super::*;

        #[test]
        fn test_observer_sees_every_edit() {
            let seen = Arc::new(AtomicUsize::new(0));
            let mut form = Form::new();
            let counter = Arc::clone(&seen);
            form.on_change(move |name, data| {
                assert_eq!(name, "title");
                assert!(data.value.as_text().is_some());
                counter.fetch_add(1, Ordering::SeqCst);
            });

            let field = form.field(FieldConfig::new("title", FieldKind::Text));
            fill(&field, "a");
            fill(&field, "ab");
            assert_eq!(seen.load(Ordering::SeqCst), 2);
        }

        #[test]
        fn test_no_observer_is_a_noop() {
            let form = Form::new();
            let field = form.field(FieldConfig::new("title", FieldKind::Text));
            fill(&field, "a");
            assert_eq!(field.state().value, RawValue::Text("a".to_string()));
        }
    }
}
