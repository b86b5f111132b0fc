use crate::error::CliError;
use expression_engine::Getters;
use model::{Schema, Value, ValueMappers, ValueType};
use serde_json::Value as Json;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Schema fields of one input record, typed.
pub type Record = HashMap<String, Value>;

/// Converts each JSON object into a typed [`Record`]. Strings go through the
/// field's mapper, so dates and enums are read the same way as in queries.
pub fn load(
    rows: &[Json],
    schema: &Schema,
    mappers: &ValueMappers,
) -> Result<Vec<Record>, CliError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| -> Result<Record, CliError> {
            let object = row.as_object().ok_or_else(|| CliError::InvalidRecord {
                index,
                reason: "expected a JSON object".to_string(),
            })?;

            schema
                .fields
                .iter()
                .map(|field| -> Result<(String, Value), CliError> {
                    let value = match object.get(&field.name) {
                        Some(json) => to_value(&field.name, &field.value_type, json, mappers)
                            .map_err(|reason| CliError::InvalidRecord { index, reason })?,
                        None => Value::Null,
                    };
                    Ok((field.name.clone(), value))
                })
                .collect()
        })
        .collect()
}

/// One getter per schema field, reading from a typed [`Record`].
pub fn getters(schema: &Schema) -> Getters<Record> {
    let mut getters = Getters::new();
    for field in &schema.fields {
        let name = field.name.clone();
        getters.insert(field.name.clone(), move |record: &Record| {
            record.get(&name).cloned().unwrap_or(Value::Null)
        });
    }
    debug!("Registered {} getters", schema.fields.len());
    getters
}

fn to_value(field: &str, value_type: &ValueType, json: &Json, mappers: &ValueMappers) -> Result<Value, String> {
    let mismatch = || format!("field {field}: expected {value_type}, got {json}");

    let value = match (value_type, json) {
        (_, Json::Null) => Value::Null,
        (_, Json::String(s)) => mappers.map(field, s).map_err(|e| e.to_string())?,
        (ValueType::Boolean, Json::Bool(b)) => Value::Boolean(*b),
        (ValueType::Int8, Json::Number(n)) => Value::Byte(integer(n).ok_or_else(mismatch)?),
        (ValueType::Int16, Json::Number(n)) => Value::Short(integer(n).ok_or_else(mismatch)?),
        (ValueType::Int32, Json::Number(n)) => Value::Int(integer(n).ok_or_else(mismatch)?),
        (ValueType::Int64, Json::Number(n)) => Value::Long(n.as_i64().ok_or_else(mismatch)?),
        (ValueType::Float32, Json::Number(n)) => Value::Float(n.as_f64().ok_or_else(mismatch)? as f32),
        (ValueType::Float64, Json::Number(n)) => Value::Double(n.as_f64().ok_or_else(mismatch)?),
        _ => {
            warn!("Cannot convert {} for field {}", json, field);
            return Err(mismatch());
        }
    };

    Ok(value)
}

fn integer<T: TryFrom<i64>>(n: &serde_json::Number) -> Option<T> {
    n.as_i64().and_then(|v| T::try_from(v).ok())
}

/// Renders a bound parameter as plain JSON.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Boolean(b) => Json::Bool(*b),
        Value::Byte(v) => Json::from(*v),
        Value::Short(v) => Json::from(*v),
        Value::Int(v) => Json::from(*v),
        Value::Long(v) => Json::from(*v),
        Value::Float(v) => Json::from(f64::from(*v)),
        Value::Double(v) => Json::from(*v),
        Value::Null => Json::Null,
        other => Json::String(other.to_string()),
    }
}
