//! Repository layer
//!
//! Traits describing data access. The SeaORM implementations live in
//! `database::repositories`.

pub mod traits;

pub use traits::{PaginatedResult, TranslationRepository};
