use crate::{
    ast::predicate::{ComparisonOp, SqlPredicate},
    render::{Render, Renderer},
};
use std::fmt;

impl Render for SqlPredicate {
    fn render(&self, r: &mut Renderer) {
        match self {
            SqlPredicate::Comparison { column, op, value } => {
                if *op == ComparisonOp::NotEq {
                    r.sql.push_str("NOT ");
                }
                r.add_column(column);

                let op_str = match op {
                    ComparisonOp::Eq | ComparisonOp::NotEq => " = ",
                    ComparisonOp::Gt => " > ",
                    ComparisonOp::GtEq => " >= ",
                    ComparisonOp::Lt => " < ",
                    ComparisonOp::LtEq => " <= ",
                    ComparisonOp::Like => " LIKE ",
                    ComparisonOp::NotLike => " NOT LIKE ",
                };
                r.sql.push_str(op_str);
                r.add_param(value.clone());
            }
            SqlPredicate::In { column, values } => {
                r.add_column(column);
                r.sql.push_str(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        r.sql.push_str(", ");
                    }
                    r.add_param(value.clone());
                }
                r.sql.push(')');
            }
            SqlPredicate::And(left, right) => {
                Render::render(left.as_ref(), r);
                r.sql.push_str(" AND ");
                Render::render(right.as_ref(), r);
            }
            SqlPredicate::Or(left, right) => {
                Render::render(left.as_ref(), r);
                r.sql.push_str(" OR ");
                Render::render(right.as_ref(), r);
            }
            SqlPredicate::Parenthesis(inner) => {
                r.sql.push('(');
                Render::render(inner.as_ref(), r);
                r.sql.push(')');
            }
        }
    }
}

/// SQL text with generic placeholders, for logs and error messages.
impl fmt::Display for SqlPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&crate::dialect::Generic).sql)
    }
}
