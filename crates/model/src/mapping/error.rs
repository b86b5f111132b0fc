use std::error::Error as StdError;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A literal could not be coerced into the value type declared for its field,
/// or a mapped value has the wrong type for the operator it is used with.
#[derive(Debug, Error)]
#[error("Failed to map: {field}, value: {literal} ({reason})")]
pub struct MappingError {
    pub field: String,
    pub literal: String,
    pub reason: String,
    #[source]
    pub source: Option<BoxError>,
}

impl MappingError {
    pub fn new(field: impl Into<String>, literal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            literal: literal.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Wraps a coercion failure. An error that already is a `MappingError`
    /// is returned unchanged.
    pub fn wrap(field: &str, literal: &str, err: BoxError) -> Self {
        match err.downcast::<MappingError>() {
            Ok(mapping) => *mapping,
            Err(other) => Self {
                field: field.to_string(),
                literal: literal.to_string(),
                reason: other.to_string(),
                source: Some(other),
            },
        }
    }

    pub fn type_mismatch(field: &str, literal: impl Into<String>, expected: &str) -> Self {
        Self::new(field, literal, format!("Type mismatch, expected {expected}"))
    }

    pub fn not_comparable(field: &str, literal: impl Into<String>) -> Self {
        Self::new(field, literal, "Cannot compare")
    }
}

/// Invalid mapper or schema configuration.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Duplicate mapper for field: {0}")]
    DuplicateField(String),

    #[error("Invalid schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read schema: {0}")]
    Io(#[from] std::io::Error),
}
