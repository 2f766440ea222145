//! SeaORM entity definitions for the translation schema

pub mod prelude;

pub mod tags;
pub mod translation_tag;
pub mod translations;
