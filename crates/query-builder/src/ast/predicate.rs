//! Defines the AST for SQL `WHERE` predicates.

use model::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum SqlPredicate {
    /// A column compared with one bound value, e.g. `age > ?`.
    Comparison {
        column: String,
        op: ComparisonOp,
        value: Value,
    },

    /// Set membership with one bound value per element, e.g. `id IN (?, ?)`.
    In { column: String, values: Vec<Value> },

    And(Box<SqlPredicate>, Box<SqlPredicate>),

    Or(Box<SqlPredicate>, Box<SqlPredicate>),

    /// Grouping kept from the query text.
    Parenthesis(Box<SqlPredicate>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,      // =
    NotEq,   // NOT c = ?
    Gt,      // >
    GtEq,    // >=
    Lt,      // <
    LtEq,    // <=
    Like,    // LIKE
    NotLike, // NOT LIKE
}

impl SqlPredicate {
    pub fn comparison(column: impl Into<String>, op: ComparisonOp, value: Value) -> Self {
        SqlPredicate::Comparison {
            column: column.into(),
            op,
            value,
        }
    }

    pub fn is_in(column: impl Into<String>, values: Vec<Value>) -> Self {
        SqlPredicate::In {
            column: column.into(),
            values,
        }
    }

    pub fn and(left: SqlPredicate, right: SqlPredicate) -> Self {
        SqlPredicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: SqlPredicate, right: SqlPredicate) -> Self {
        SqlPredicate::Or(Box::new(left), Box::new(right))
    }

    pub fn parenthesis(inner: SqlPredicate) -> Self {
        SqlPredicate::Parenthesis(Box::new(inner))
    }
}
