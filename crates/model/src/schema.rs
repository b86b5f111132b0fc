use crate::{
    core::value_type::ValueType,
    mapping::{error::SchemaError, mapper::Mapper, table::ValueMappers},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::debug;

/// Queryable fields of a record type, loaded from JSON:
///
/// ```json
/// {"fields": [
///   {"name": "age", "type": "int32"},
///   {"name": "createdAt", "type": "date", "column": "created_at"},
///   {"name": "status", "type": "enum", "enum_name": "Status", "symbols": ["A", "B"]}
/// ]}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    /// Column name override for SQL rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(flatten)]
    pub value_type: ValueType,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            column: None,
            value_type,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        debug!("Loading schema from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn value_mappers(&self) -> Result<ValueMappers, SchemaError> {
        ValueMappers::new(
            self.fields
                .iter()
                .map(|f| Mapper::for_type(f.name.clone(), &f.value_type)),
        )
    }
}
