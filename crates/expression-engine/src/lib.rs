//! In-memory evaluation of sift queries against plain Rust values.
//!
//! Register a getter per queryable field, hand the factory to a
//! [`QueryParser`](compiler::QueryParser) and test records with the compiled
//! [`Predicate`].

pub mod context;
pub mod eval;
pub mod factory;
pub mod predicate;

pub use context::Getters;
pub use factory::InMemoryPredicateFactory;
pub use predicate::Predicate;
