use thiserror::Error;

/// Errors raised while turning query text into an AST.
///
/// Every grammar failure surfaces as one of these variants; a failed parse
/// never yields a partial tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Illegal query: {query} ({reason})")]
    IllegalQuery { query: String, reason: String },

    #[error("Illegal query part: {0}")]
    IllegalQueryPart(String),

    #[error("Invalid query part: {0}")]
    InvalidQueryPart(String),

    #[error("Query exceeds the maximum nesting depth of {max_depth}: {query}")]
    NestingTooDeep { query: String, max_depth: usize },

    #[error("Invalid set literal for '{field}': {literal}")]
    InvalidSetLiteral { field: String, literal: String },

    #[error("Unknown name: {0}")]
    UnknownField(String),

    #[error("Incomplete logical expression: {0}")]
    IncompleteLogical(String),
}

impl ParseError {
    pub fn illegal_query(query: &str, reason: impl Into<String>) -> Self {
        ParseError::IllegalQuery {
            query: query.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the query text or fragment the error refers to.
    pub fn fragment(&self) -> &str {
        match self {
            ParseError::IllegalQuery { query, .. } => query,
            ParseError::IllegalQueryPart(part) | ParseError::InvalidQueryPart(part) => part,
            ParseError::NestingTooDeep { query, .. } => query,
            ParseError::InvalidSetLiteral { literal, .. } => literal,
            ParseError::UnknownField(name) => name,
            ParseError::IncompleteLogical(node) => node,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
