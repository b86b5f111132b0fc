//! Compiles parsed queries into backend predicates.
//!
//! [`QueryParser`] parses the query text, maps every literal through the
//! [`ValueMappers`](model::ValueMappers) table and hands the typed values to a
//! [`PredicateFactory`]. What the factory builds is up to the backend.

pub mod error;
pub mod factory;
pub mod parser;

pub use error::{QueryError, QueryResult};
pub use factory::PredicateFactory;
pub use parser::QueryParser;
