pub mod core;
pub mod mapping;
pub mod schema;

pub use crate::core::{value::Value, value_type::ValueType};
pub use mapping::{
    error::{BoxError, MappingError, SchemaError},
    mapper::Mapper,
    table::ValueMappers,
};
pub use schema::{FieldSpec, Schema};
