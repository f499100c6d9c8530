//! Form field components and form-state coordination for Ratatui
//!
//! Visual input components (text, checkbox, radio, file, range, textarea,
//! select) register themselves with a shared [`Form`] controller that tracks
//! per-field value/validity state, validates on change/blur and at submit
//! time, and aggregates normalized values into a [`FormData`] map handed to
//! the caller's submit handler.

pub mod element;
pub mod error;
pub mod markdown;
pub mod normalize;
pub mod state;
pub mod ui;
pub mod validate;
pub mod value;

pub use element::{ChangeData, Element, EventKind, FieldKind, FileHandle, SelectOption};
pub use error::FormError;
pub use markdown::{MarkdownRenderer, PulldownRenderer};
pub use normalize::{normalize_form_data, FormData};
pub use state::{
    data_from_event, Field, FieldBinding, FieldConfig, FieldState, Form, FormStatus, Registry,
    SubmitHandler, SubmitOutcome,
};
pub use validate::{is_falsy, required_validator, Requirement, Validator};
pub use value::{ensure_array, FormValue, RawValue};
