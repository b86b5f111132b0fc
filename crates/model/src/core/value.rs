use crate::core::value_type::ValueType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

/// A literal after type mapping, or a field value read from a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    /// Calendar date or date-time resolved to an instant.
    Timestamp(DateTime<Utc>),
    /// Zone-less date.
    Date(NaiveDate),
    /// Zone-less date-time.
    DateTime(NaiveDateTime),
    /// Enum type name and symbol.
    Enum(String, String),
    Null,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Orders two values of the same kind. Values of different kinds, nulls
    /// and enums are not comparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Byte(a), Byte(b)) => Some(a.cmp(b)),
            (Short(a), Short(b)) => Some(a.cmp(b)),
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Long(a), Long(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Double(a), Double(b)) => a.partial_cmp(b),
            (Char(a), Char(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Boolean(_) => Some(ValueType::Boolean),
            Value::Byte(_) => Some(ValueType::Int8),
            Value::Short(_) => Some(ValueType::Int16),
            Value::Int(_) => Some(ValueType::Int32),
            Value::Long(_) => Some(ValueType::Int64),
            Value::Float(_) => Some(ValueType::Float32),
            Value::Double(_) => Some(ValueType::Float64),
            Value::Char(_) => Some(ValueType::Char),
            Value::String(_) => Some(ValueType::String),
            Value::Timestamp(_) => Some(ValueType::Date),
            Value::Date(_) => Some(ValueType::LocalDate),
            Value::DateTime(_) => Some(ValueType::LocalDateTime),
            Value::Enum(name, _) => Some(ValueType::Enum {
                enum_name: name.clone(),
                symbols: Vec::new(),
            }),
            Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            Value::Date(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::Enum(_, v) => write!(f, "{v}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
