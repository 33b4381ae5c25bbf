//! Core type definitions used across the Tally workspace.

pub mod credential;
pub mod field_error;

pub use credential::{Credential, normalize_email};
pub use field_error::FieldError;
