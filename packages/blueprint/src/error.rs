use thiserror::Error;

pub type BlueprintResult<T> = Result<T, BlueprintError>;

/// Fatal errors: the blueprint cannot exist at all
#[derive(Error, Debug)]
pub enum BlueprintError {
    #[error("A blueprint model is required")]
    MissingModel,

    #[error("Invalid blueprint props: expected a map, found {found}")]
    InvalidProps { found: String },

    #[error("Blueprint normalization re-entered itself")]
    Reentrant,

    #[error(transparent)]
    Load(#[from] folio_registry::LoadError),

    #[error("Failed to serialize blueprint: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-field errors, recovered into an error field by the caller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("The field name is missing")]
    MissingName,

    #[error("Invalid field type (\"{field_type}\")")]
    InvalidType { field_type: String },
}
