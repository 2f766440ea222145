//! Input validation utilities
//!
//! Field-level rules are collected by a [`Validator`] and applied to a map of
//! optional string values. Every failing rule is reported, not only the first.
//!
//! # Usage
//!
//! ```rust
//! use i18n_store::utils::validation::{Validator, ValidationRule};
//! use std::collections::HashMap;
//!
//! let validator = Validator::new()
//!     .rule(ValidationRule::required("key"))
//!     .rule(ValidationRule::max_length("key", 255));
//!
//! let mut data = HashMap::new();
//! data.insert("key".to_string(), Some("auth.login".to_string()));
//! assert!(validator.validate(&data).is_ok());
//! ```

use std::collections::HashMap;
use thiserror::Error;

/// Validation errors that can occur during input validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is required but missing or empty
    #[error("Field '{field}' is required")]
    Required { field: String },

    /// Field was supplied but is blank
    #[error("Field '{field}' must not be empty")]
    Blank { field: String },

    /// Field value is too long
    #[error("Field '{field}' must be at most {max} characters long (got {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    /// Field value doesn't match required pattern
    #[error("Field '{field}' has invalid format")]
    InvalidFormat { field: String },

    /// Custom validation error
    #[error("Field '{field}': {message}")]
    Custom { field: String, message: String },
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

/// A validation rule that can be applied to a field
#[derive(Debug, Clone)]
pub enum ValidationRule {
    /// Field is required (not None, not blank)
    Required(String),

    /// Field may be absent, but when present it must not be blank
    NotBlank(String),

    /// Field must be at most max characters long
    MaxLength { field: String, max: usize },

    /// Field must match a regex pattern
    Regex { field: String, pattern: String },

    /// Custom validation function
    Custom {
        field: String,
        validator: fn(&str) -> Result<(), String>,
    },
}

impl ValidationRule {
    /// Create a required field rule
    pub fn required<S: Into<String>>(field: S) -> Self {
        Self::Required(field.into())
    }

    /// Create a rule rejecting blank values for optional fields
    pub fn not_blank<S: Into<String>>(field: S) -> Self {
        Self::NotBlank(field.into())
    }

    /// Create a maximum length rule (counted in characters)
    pub fn max_length<S: Into<String>>(field: S, max: usize) -> Self {
        Self::MaxLength {
            field: field.into(),
            max,
        }
    }

    /// Create a regex pattern rule
    pub fn regex<S: Into<String>>(field: S, pattern: S) -> Self {
        Self::Regex {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a custom validation rule
    pub fn custom<S: Into<String>>(field: S, validator: fn(&str) -> Result<(), String>) -> Self {
        Self::Custom {
            field: field.into(),
            validator,
        }
    }
}

/// Validator that applies multiple validation rules
#[derive(Debug)]
pub struct Validator {
    rules: Vec<ValidationRule>,
}

impl Validator {
    /// Create a new empty validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a validation rule
    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add multiple validation rules
    pub fn rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validate a map of field values
    pub fn validate(&self, data: &HashMap<String, Option<String>>) -> ValidationResult<()> {
        let errors: Vec<ValidationError> = self
            .rules
            .iter()
            .filter_map(|rule| self.apply_rule(rule, data).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Apply a single validation rule
    fn apply_rule(
        &self,
        rule: &ValidationRule,
        data: &HashMap<String, Option<String>>,
    ) -> Result<(), ValidationError> {
        match rule {
            ValidationRule::Required(field) => {
                let value = data.get(field).and_then(|v| v.as_ref());
                match value {
                    Some(v) if !v.trim().is_empty() => Ok(()),
                    _ => Err(ValidationError::Required {
                        field: field.clone(),
                    }),
                }
            }

            ValidationRule::NotBlank(field) => match data.get(field) {
                Some(Some(value)) if value.trim().is_empty() => Err(ValidationError::Blank {
                    field: field.clone(),
                }),
                _ => Ok(()),
            },

            ValidationRule::MaxLength { field, max } => {
                if let Some(Some(value)) = data.get(field) {
                    let actual = value.chars().count();
                    if actual > *max {
                        Err(ValidationError::TooLong {
                            field: field.clone(),
                            max: *max,
                            actual,
                        })
                    } else {
                        Ok(())
                    }
                } else {
                    Ok(())
                }
            }

            ValidationRule::Regex { field, pattern } => match data.get(field) {
                // Blank values are reported by Required/NotBlank
                Some(Some(value)) if !value.is_empty() => match regex::Regex::new(pattern) {
                    Ok(regex) if regex.is_match(value) => Ok(()),
                    Ok(_) => Err(ValidationError::InvalidFormat {
                        field: field.clone(),
                    }),
                    Err(_) => Err(ValidationError::Custom {
                        field: field.clone(),
                        message: "Invalid regex pattern".to_string(),
                    }),
                },
                _ => Ok(()),
            },

            ValidationRule::Custom { field, validator } => {
                if let Some(Some(value)) = data.get(field) {
                    validator(value).map_err(|message| ValidationError::Custom {
                        field: field.clone(),
                        message,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Join validation failures into a single human readable message
pub fn describe_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
