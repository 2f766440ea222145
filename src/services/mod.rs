//! Service layer for business logic
//!
//! Services sit between the web handlers and the repository layer. They own
//! validation, export caching and cache invalidation.

pub mod translation;

pub use translation::TranslationService;
