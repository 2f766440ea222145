//! Error type definitions for the translation store
//!
//! This module defines all error types used throughout the application,
//! providing a hierarchical error system that makes debugging and error
//! handling more straightforward.

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur in the application.
/// It uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Repository layer errors that have no more specific mapping
    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Uniqueness conflicts, e.g. a duplicate (key, locale) pair
    #[error("Conflict on {resource}: {message}")]
    Conflict { resource: String, message: String },

    /// Export cache failures
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Constraint violations (unique, foreign key, etc.)
    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Record not found
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound {
        table: String,
        field: String,
        value: String,
    },

    /// A row was written but could not be read back inside the same transaction
    #[error("Inconsistent state: {message}")]
    Inconsistent { message: String },
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConstraintViolation {
                constraint,
                message,
            } => Self::Conflict {
                resource: constraint,
                message,
            },
            RepositoryError::RecordNotFound { table, value, .. } => Self::NotFound {
                resource: table,
                id: value,
            },
            other => Self::Repository(other),
        }
    }
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error for a resource id
    pub fn not_found<R: Into<String>, I: ToString>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for failures of the storage or cache backends rather than the request
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Repository(_)
                | Self::Cache { .. }
                | Self::Configuration { .. }
                | Self::Internal { .. }
        )
    }
}

impl RepositoryError {
    /// Create a record not found error
    pub fn record_not_found<T: Into<String>, F: Into<String>, V: ToString>(
        table: T,
        field: F,
        value: V,
    ) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint_violation<C: Into<String>, M: Into<String>>(constraint: C, message: M) -> Self {
        Self::ConstraintViolation {
            constraint: constraint.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_lifts_to_conflict() {
        let err: AppError =
            RepositoryError::constraint_violation("translation", "key exists").into();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert!(!err.is_backend());
    }

    #[test]
    fn record_not_found_lifts_to_not_found() {
        let err: AppError = RepositoryError::record_not_found("translation", "id", 42).into();
        match err {
            AppError::NotFound { resource, id } => {
                assert_eq!(resource, "translation");
                assert_eq!(id, "42");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn database_errors_are_backend_errors() {
        let err: AppError =
            RepositoryError::Database(sea_orm::DbErr::Custom("pool timed out".into())).into();
        assert!(err.is_backend());
        assert!(AppError::Database(sea_orm::DbErr::Custom("x".into())).is_backend());
        assert!(!AppError::validation("bad").is_backend());
    }
}
