//! Centralized error handling for the translation store
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed input, rejected before any storage access
//! - **Conflict Errors**: a `(key, locale)` pair that already exists
//! - **Not Found Errors**: unknown translation ids
//! - **Backend Errors**: database or cache failures
//!
//! # Usage
//!
//! ```rust
//! use i18n_store::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::validation("key is required"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
