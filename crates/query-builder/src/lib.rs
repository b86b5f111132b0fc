//! Renders sift queries as parameterized SQL `WHERE` clauses.

pub mod ast;
pub mod dialect;
pub mod factory;
pub mod names;
pub mod render;

pub use ast::predicate::{ComparisonOp, SqlPredicate};
pub use dialect::{Dialect, Generic, MySql, Postgres};
pub use factory::SqlPredicateFactory;
pub use names::NameMappings;
pub use render::{Render, Renderer, SqlFragment};
