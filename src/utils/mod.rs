//! Shared helpers
//!
//! - `validation` for request field validation

pub mod validation;

pub use validation::{ValidationError, ValidationRule, Validator};
