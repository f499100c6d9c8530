//! Ratatui rendering layer for form components

pub mod components;

pub use components::*;
