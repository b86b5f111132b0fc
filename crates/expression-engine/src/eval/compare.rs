use compiler::{QueryError, QueryResult};
use model::Value;
use std::{cmp, mem};
use tracing::trace;

/// Ordering comparisons supported in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl Ordering {
    fn accepts(&self, ordering: cmp::Ordering) -> bool {
        match self {
            Ordering::GreaterThan => ordering.is_gt(),
            Ordering::GreaterThanOrEqual => ordering.is_ge(),
            Ordering::LessThan => ordering.is_lt(),
            Ordering::LessThanOrEqual => ordering.is_le(),
        }
    }
}

/// Compares a record value (left) with a query value (right).
pub struct ComparisonEvaluator<'a> {
    field: &'a str,
    left: &'a Value,
    right: &'a Value,
}

impl<'a> ComparisonEvaluator<'a> {
    pub fn new(field: &'a str, left: &'a Value, right: &'a Value) -> Self {
        Self { field, left, right }
    }

    pub fn evaluate(&self, op: Ordering) -> QueryResult<bool> {
        let ordering = self.left.compare(self.right).ok_or_else(|| self.incomparable())?;
        trace!("{} {:?} {}: {:?}", self.left, op, self.right, ordering);
        Ok(op.accepts(ordering))
    }

    fn incomparable(&self) -> QueryError {
        if !is_orderable(self.left) {
            return QueryError::not_comparable(self.field, self.left);
        }
        if !is_orderable(self.right) {
            return QueryError::not_comparable(self.field, self.right);
        }
        if mem::discriminant(self.left) != mem::discriminant(self.right) {
            return QueryError::type_mismatch(
                self.field,
                format!("{} and {}", self.left, self.right),
                &type_name(self.right),
            );
        }

        QueryError::not_comparable(self.field, format!("{} and {}", self.left, self.right))
    }
}

/// Values that have an order at all. Nulls and enum symbols do not.
pub fn is_orderable(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Enum(..))
}

fn type_name(value: &Value) -> String {
    value
        .value_type()
        .map_or_else(|| "null".to_string(), |t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(left: Value, right: Value, op: Ordering) -> QueryResult<bool> {
        ComparisonEvaluator::new("f", &left, &right).evaluate(op)
    }

    #[test]
    fn test_ordering_same_kind() {
        assert!(eval(Value::Int(2), Value::Int(1), Ordering::GreaterThan).unwrap());
        assert!(eval(Value::Int(1), Value::Int(1), Ordering::GreaterThanOrEqual).unwrap());
        assert!(!eval(Value::Int(1), Value::Int(1), Ordering::LessThan).unwrap());
        assert!(eval(Value::from("a"), Value::from("b"), Ordering::LessThanOrEqual).unwrap());
    }

    #[test]
    fn test_type_mismatch() {
        let err = eval(Value::Int(1), Value::Long(1), Ordering::GreaterThan).unwrap_err();
        match err {
            QueryError::Mapping(e) => assert!(e.reason.starts_with("Type mismatch")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_and_enum_are_not_comparable() {
        for (left, right) in [
            (Value::Null, Value::Int(1)),
            (Value::Int(1), Value::Null),
            (Value::Enum("S".into(), "A".into()), Value::Enum("S".into(), "B".into())),
        ] {
            match eval(left, right, Ordering::LessThan).unwrap_err() {
                QueryError::Mapping(e) => assert_eq!(e.reason, "Cannot compare"),
                other => panic!("Unexpected error: {other:?}"),
            }
        }
    }
}
