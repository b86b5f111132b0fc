use model::MappingError;
use sift_syntax::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl QueryError {
    pub fn unknown_field(name: &str) -> Self {
        QueryError::Parse(ParseError::UnknownField(name.to_string()))
    }

    pub fn type_mismatch(field: &str, value: impl ToString, expected: &str) -> Self {
        QueryError::Mapping(MappingError::type_mismatch(field, value.to_string(), expected))
    }

    pub fn not_comparable(field: &str, value: impl ToString) -> Self {
        QueryError::Mapping(MappingError::not_comparable(field, value.to_string()))
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
