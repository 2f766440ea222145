pub use super::tags::Entity as Tags;
pub use super::translation_tag::Entity as TranslationTag;
pub use super::translations::Entity as Translations;
