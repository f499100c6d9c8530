//! Typed errors for the submit flow

use thiserror::Error;

/// Error type for form submission.
///
/// Validation failures are not errors; they are surfaced as field-local
/// error state and a [`crate::state::SubmitOutcome::Rejected`] outcome.
#[derive(Debug, Error)]
pub enum FormError {
    /// A second submit was attempted while one is still in flight.
    #[error("a submit is already in progress")]
    SubmitInProgress,

    /// The caller-supplied submit handler failed.
    #[error("submit handler failed: {0}")]
    Handler(#[source] anyhow::Error),
}
