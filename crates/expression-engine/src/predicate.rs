use compiler::QueryResult;
use std::{fmt, sync::Arc};

type Test<R> = Arc<dyn Fn(&R) -> QueryResult<bool> + Send + Sync>;

/// A compiled query that can be tested against records of type `R`.
///
/// Testing can fail when a record holds a value the query cannot be applied
/// to, such as a number where a `≈` pattern expects a string.
pub struct Predicate<R> {
    test: Test<R>,
}

impl<R: 'static> Predicate<R> {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&R) -> QueryResult<bool> + Send + Sync + 'static,
    {
        Self { test: Arc::new(test) }
    }

    pub fn test(&self, record: &R) -> QueryResult<bool> {
        (self.test)(record)
    }

    /// Short-circuits: `right` is not evaluated when `left` fails the record.
    pub fn and(self, right: Predicate<R>) -> Self {
        Self::new(move |record| Ok(self.test(record)? && right.test(record)?))
    }

    /// Short-circuits: `right` is not evaluated when `left` accepts the record.
    pub fn or(self, right: Predicate<R>) -> Self {
        Self::new(move |record| Ok(self.test(record)? || right.test(record)?))
    }

    pub fn negate(self) -> Self {
        Self::new(move |record| Ok(!self.test(record)?))
    }

    /// Keeps the records the predicate accepts, stopping at the first error.
    pub fn filter<'a>(&self, records: impl IntoIterator<Item = &'a R>) -> QueryResult<Vec<&'a R>> {
        let mut matched = Vec::new();
        for record in records {
            if self.test(record)? {
                matched.push(record);
            }
        }
        Ok(matched)
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}
