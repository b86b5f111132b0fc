use crate::error::QueryResult;
use model::Value;

/// Builds backend predicates from compiled comparisons.
///
/// Every comparison receives the field name and the literal already mapped to
/// its typed [`Value`]. Comparisons may fail, for instance when the backend
/// does not know the field or the value type does not suit the operator.
/// Combinators never fail.
pub trait PredicateFactory {
    type Predicate;

    fn equal(&self, field: &str, value: Value) -> QueryResult<Self::Predicate>;

    fn not_equal(&self, field: &str, value: Value) -> QueryResult<Self::Predicate>;

    fn greater_than(&self, field: &str, value: Value) -> QueryResult<Self::Predicate>;

    fn greater_than_or_equal(&self, field: &str, value: Value) -> QueryResult<Self::Predicate>;

    fn less_than(&self, field: &str, value: Value) -> QueryResult<Self::Predicate>;

    fn less_than_or_equal(&self, field: &str, value: Value) -> QueryResult<Self::Predicate>;

    /// `*` in the pattern stands for any run of characters.
    fn like(&self, field: &str, value: Value) -> QueryResult<Self::Predicate>;

    fn not_like(&self, field: &str, value: Value) -> QueryResult<Self::Predicate>;

    fn is_in(&self, field: &str, values: Vec<Value>) -> QueryResult<Self::Predicate>;

    fn and(&self, left: Self::Predicate, right: Self::Predicate) -> Self::Predicate;

    fn or(&self, left: Self::Predicate, right: Self::Predicate) -> Self::Predicate;

    fn parenthesis(&self, inner: Self::Predicate) -> Self::Predicate {
        inner
    }
}
