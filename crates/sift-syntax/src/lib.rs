//! Grammar for sift queries.
//!
//! A query is a chain of comparisons (`field <op> literal`) joined by `&&`
//! and `||` and optionally grouped with parentheses. This crate only builds
//! the AST; turning it into something executable is left to a predicate
//! factory.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{
    node::{Comparison, Logical, Node},
    operator::{ComparisonOperator, LogicalOperator, parse_node},
};
pub use error::{ParseError, ParseResult};
pub use parser::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_HEIGHT, Parser, ParserConfig, parse};
