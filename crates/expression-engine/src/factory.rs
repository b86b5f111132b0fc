use crate::{
    context::{Getter, Getters},
    eval::{
        compare::{ComparisonEvaluator, Ordering, is_orderable},
        wildcard::WildcardPattern,
    },
    predicate::Predicate,
};
use compiler::{PredicateFactory, QueryError, QueryResult};
use model::{MappingError, Value};
use tracing::debug;

/// Builds [`Predicate`]s that read record fields through [`Getters`].
#[derive(Debug, Clone)]
pub struct InMemoryPredicateFactory<R> {
    getters: Getters<R>,
}

impl<R: 'static> InMemoryPredicateFactory<R> {
    pub fn new(getters: Getters<R>) -> Self {
        Self { getters }
    }

    pub fn getters(&self) -> &Getters<R> {
        &self.getters
    }

    fn getter(&self, field: &str) -> QueryResult<Getter<R>> {
        self.getters.get(field).cloned().ok_or_else(|| {
            debug!("Getter missing for: {}", field);
            QueryError::unknown_field(field)
        })
    }

    fn ordering(&self, field: &str, value: Value, op: Ordering) -> QueryResult<Predicate<R>> {
        let getter = self.getter(field)?;
        if !is_orderable(&value) {
            return Err(QueryError::not_comparable(field, &value));
        }

        let field = field.to_string();
        Ok(Predicate::new(move |record| {
            ComparisonEvaluator::new(&field, &getter(record), &value).evaluate(op)
        }))
    }

    fn wildcard(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        let getter = self.getter(field)?;
        let pattern = match &value {
            Value::String(pattern) => WildcardPattern::new(pattern)
                .map_err(|e| MappingError::new(field, pattern, e.to_string()))?,
            other => return Err(QueryError::type_mismatch(field, other, "string")),
        };

        let field = field.to_string();
        Ok(Predicate::new(move |record| match getter(record) {
            Value::String(s) => Ok(pattern.is_match(&s)),
            other => Err(QueryError::type_mismatch(&field, &other, "string")),
        }))
    }
}

impl<R: 'static> PredicateFactory for InMemoryPredicateFactory<R> {
    type Predicate = Predicate<R>;

    fn equal(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        let getter = self.getter(field)?;
        Ok(Predicate::new(move |record| Ok(getter(record) == value)))
    }

    fn not_equal(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        Ok(self.equal(field, value)?.negate())
    }

    fn greater_than(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        self.ordering(field, value, Ordering::GreaterThan)
    }

    fn greater_than_or_equal(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        self.ordering(field, value, Ordering::GreaterThanOrEqual)
    }

    fn less_than(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        self.ordering(field, value, Ordering::LessThan)
    }

    fn less_than_or_equal(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        self.ordering(field, value, Ordering::LessThanOrEqual)
    }

    fn like(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        self.wildcard(field, value)
    }

    fn not_like(&self, field: &str, value: Value) -> QueryResult<Predicate<R>> {
        Ok(self.wildcard(field, value)?.negate())
    }

    fn is_in(&self, field: &str, values: Vec<Value>) -> QueryResult<Predicate<R>> {
        let getter = self.getter(field)?;
        Ok(Predicate::new(move |record| Ok(values.contains(&getter(record)))))
    }

    fn and(&self, left: Predicate<R>, right: Predicate<R>) -> Predicate<R> {
        left.and(right)
    }

    fn or(&self, left: Predicate<R>, right: Predicate<R>) -> Predicate<R> {
        left.or(right)
    }
}
