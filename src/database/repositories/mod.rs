//! SeaORM repository implementations

pub mod tag;
pub mod translation;

pub use tag::TagSeaOrmRepository;
pub use translation::TranslationSeaOrmRepository;
