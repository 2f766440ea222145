pub mod translation;

pub use translation::{
    ExportPayload, ExportRow, Translation, TranslationCreateRequest, TranslationExportQuery,
    TranslationListQuery, TranslationSearchFilters, TranslationSearchQuery,
    TranslationUpdateRequest, validate_scope,
};
