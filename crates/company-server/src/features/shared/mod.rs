//! Shared utilities for feature modules
//!
//! - **validation**: field-level input checks applied after deserialization
//! - **error_helpers**: database error classification

pub mod error_helpers;
pub mod validation;

pub use error_helpers::is_unique_violation;
pub use validation::{validate_text, FieldValidationError};
