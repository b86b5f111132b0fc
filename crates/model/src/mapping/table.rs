use crate::{
    core::value::Value,
    mapping::{
        error::{MappingError, SchemaError},
        mapper::Mapper,
    },
};
use std::collections::HashMap;
use tracing::trace;

/// Name-keyed mapper lookup. Fields without a mapper keep their literal text
/// as a string value.
#[derive(Debug, Clone, Default)]
pub struct ValueMappers {
    mappers: HashMap<String, Mapper>,
}

impl ValueMappers {
    pub fn new(mappers: impl IntoIterator<Item = Mapper>) -> Result<Self, SchemaError> {
        let mut table = HashMap::new();
        for mapper in mappers {
            let name = mapper.name().to_string();
            if table.insert(name.clone(), mapper).is_some() {
                return Err(SchemaError::DuplicateField(name));
            }
        }

        Ok(Self { mappers: table })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Mapper> {
        self.mappers.get(field)
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    pub fn map(&self, field: &str, literal: &str) -> Result<Value, MappingError> {
        match self.mappers.get(field) {
            Some(mapper) => mapper.map(literal),
            None => {
                trace!("No mapper for field {}, keeping literal as string", field);
                Ok(Value::String(literal.to_string()))
            }
        }
    }
}
