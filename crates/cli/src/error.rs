use compiler::QueryError;
use model::SchemaError;
use sift_syntax::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse the query: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to compile the query: {0}")]
    Query(#[from] QueryError),

    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Failed to deserialize input as JSON: {0}")]
    JsonDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Invalid zone offset: {0} seconds")]
    InvalidZoneOffset(i32),
}
