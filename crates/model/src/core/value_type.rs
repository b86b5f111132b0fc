use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a queryable field.
///
/// Serialized with an internal `type` tag so schema files read as
/// `{"name": "age", "type": "int32"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Char,
    String,
    /// Date or date-time, resolved to a UTC instant.
    Date,
    LocalDate,
    LocalDateTime,
    Enum {
        enum_name: String,
        symbols: Vec<String>,
    },
}

impl ValueType {
    pub fn name(&self) -> &str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Int8 => "int8",
            ValueType::Int16 => "int16",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Float32 => "float32",
            ValueType::Float64 => "float64",
            ValueType::Char => "char",
            ValueType::String => "string",
            ValueType::Date => "date",
            ValueType::LocalDate => "local_date",
            ValueType::LocalDateTime => "local_date_time",
            ValueType::Enum { enum_name, .. } => enum_name,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
