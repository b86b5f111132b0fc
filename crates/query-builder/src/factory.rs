use crate::{
    ast::predicate::{ComparisonOp, SqlPredicate},
    names::NameMappings,
};
use compiler::{PredicateFactory, QueryError, QueryResult};
use model::Value;
use tracing::trace;

const WILDCARD: char = '*';
const LIKE_WILDCARD: &str = "%";

/// Builds parameterized SQL predicates over the columns in [`NameMappings`].
#[derive(Debug, Clone, Default)]
pub struct SqlPredicateFactory {
    names: NameMappings,
}

impl SqlPredicateFactory {
    pub fn new(names: NameMappings) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &NameMappings {
        &self.names
    }

    fn comparison(&self, field: &str, op: ComparisonOp, value: Value) -> QueryResult<SqlPredicate> {
        let column = self.names.column(field)?;
        trace!("Mapped field {} to column {}", field, column);
        Ok(SqlPredicate::comparison(column, op, value))
    }

    fn like_pattern(field: &str, value: Value) -> QueryResult<Value> {
        match value {
            Value::String(pattern) => Ok(Value::String(pattern.replace(WILDCARD, LIKE_WILDCARD))),
            other => Err(QueryError::type_mismatch(field, other, "string")),
        }
    }
}

impl PredicateFactory for SqlPredicateFactory {
    type Predicate = SqlPredicate;

    fn equal(&self, field: &str, value: Value) -> QueryResult<SqlPredicate> {
        self.comparison(field, ComparisonOp::Eq, value)
    }

    fn not_equal(&self, field: &str, value: Value) -> QueryResult<SqlPredicate> {
        self.comparison(field, ComparisonOp::NotEq, value)
    }

    fn greater_than(&self, field: &str, value: Value) -> QueryResult<SqlPredicate> {
        self.comparison(field, ComparisonOp::Gt, value)
    }

    fn greater_than_or_equal(&self, field: &str, value: Value) -> QueryResult<SqlPredicate> {
        self.comparison(field, ComparisonOp::GtEq, value)
    }

    fn less_than(&self, field: &str, value: Value) -> QueryResult<SqlPredicate> {
        self.comparison(field, ComparisonOp::Lt, value)
    }

    fn less_than_or_equal(&self, field: &str, value: Value) -> QueryResult<SqlPredicate> {
        self.comparison(field, ComparisonOp::LtEq, value)
    }

    fn like(&self, field: &str, value: Value) -> QueryResult<SqlPredicate> {
        let pattern = Self::like_pattern(field, value)?;
        self.comparison(field, ComparisonOp::Like, pattern)
    }

    fn not_like(&self, field: &str, value: Value) -> QueryResult<SqlPredicate> {
        let pattern = Self::like_pattern(field, value)?;
        self.comparison(field, ComparisonOp::NotLike, pattern)
    }

    fn is_in(&self, field: &str, values: Vec<Value>) -> QueryResult<SqlPredicate> {
        let column = self.names.column(field)?;
        Ok(SqlPredicate::is_in(column, values))
    }

    fn and(&self, left: SqlPredicate, right: SqlPredicate) -> SqlPredicate {
        SqlPredicate::and(left, right)
    }

    fn or(&self, left: SqlPredicate, right: SqlPredicate) -> SqlPredicate {
        SqlPredicate::or(left, right)
    }

    fn parenthesis(&self, inner: SqlPredicate) -> SqlPredicate {
        SqlPredicate::parenthesis(inner)
    }
}
