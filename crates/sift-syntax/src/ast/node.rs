use crate::ast::operator::{ComparisonOperator, LogicalOperator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed query.
///
/// The tree is immutable once built; a logical node that is still waiting
/// for its right operand is replaced by a completed copy rather than mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    /// `field <op> literal`
    Comparison(Comparison),
    /// `left && right` or `left || right`
    Logical(Logical),
    /// `( inner )`
    Parenthesis(Box<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    operator: ComparisonOperator,
    field: String,
    literal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Logical {
    operator: LogicalOperator,
    left: Box<Node>,
    right: Option<Box<Node>>,
}

impl Comparison {
    pub fn new(operator: ComparisonOperator, field: &str, literal: &str) -> Self {
        Self {
            operator,
            field: field.to_string(),
            literal: literal.to_string(),
        }
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn is_valid(&self) -> bool {
        !self.field.is_empty() && !self.literal.is_empty()
    }
}

impl Logical {
    /// A logical node that has seen its operator but not its right operand.
    pub fn open(operator: LogicalOperator, left: Node) -> Self {
        Self {
            operator,
            left: Box::new(left),
            right: None,
        }
    }

    pub fn new(operator: LogicalOperator, left: Node, right: Node) -> Self {
        Self {
            operator,
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    /// Returns a copy of this node with `right` as its right operand.
    pub fn with_right(self, right: Node) -> Self {
        Self {
            operator: self.operator,
            left: self.left,
            right: Some(Box::new(right)),
        }
    }

    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.right.is_none()
    }

    pub fn is_valid(&self) -> bool {
        self.left.is_valid() && self.right.as_ref().is_some_and(|right| right.is_valid())
    }
}

impl Node {
    pub fn comparison(operator: ComparisonOperator, field: &str, literal: &str) -> Self {
        Node::Comparison(Comparison::new(operator, field, literal))
    }

    pub fn and(left: Node, right: Node) -> Self {
        Node::Logical(Logical::new(LogicalOperator::And, left, right))
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::Logical(Logical::new(LogicalOperator::Or, left, right))
    }

    pub fn parenthesis(inner: Node) -> Self {
        Node::Parenthesis(Box::new(inner))
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Node::Comparison(comparison) => comparison.is_valid(),
            Node::Logical(logical) => logical.is_valid(),
            Node::Parenthesis(inner) => inner.is_valid(),
        }
    }

    /// True for a logical node still missing its right operand.
    pub fn is_open(&self) -> bool {
        matches!(self, Node::Logical(logical) if logical.is_open())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.literal)
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.right {
            Some(right) => write!(f, "{} {} {}", self.left, self.operator, right),
            None => write!(f, "{} {}", self.left, self.operator),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Comparison(comparison) => write!(f, "{comparison}"),
            Node::Logical(logical) => write!(f, "{logical}"),
            Node::Parenthesis(inner) => write!(f, "({inner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(field: &str, literal: &str) -> Node {
        Node::comparison(ComparisonOperator::Equal, field, literal)
    }

    #[test]
    fn test_comparison_validity() {
        assert!(eq("a", "b").is_valid());
        assert!(!eq("", "b").is_valid());
        assert!(!eq("a", "").is_valid());
    }

    #[test]
    fn test_open_logical_is_not_valid_until_completed() {
        let open = Logical::open(LogicalOperator::And, eq("a", "b"));
        assert!(open.is_open());
        assert!(!open.is_valid());

        let closed = open.with_right(eq("c", "d"));
        assert!(!closed.is_open());
        assert!(closed.is_valid());
        assert_eq!(Node::Logical(closed), Node::and(eq("a", "b"), eq("c", "d")));
    }

    #[test]
    fn test_parenthesis_delegates_validity() {
        let open = Node::Logical(Logical::open(LogicalOperator::Or, eq("a", "b")));
        assert!(!Node::parenthesis(open).is_valid());
        assert!(Node::parenthesis(eq("a", "b")).is_valid());
    }

    #[test]
    fn test_structural_equality_distinguishes_variants() {
        assert_ne!(
            Node::and(eq("a", "b"), eq("c", "d")),
            Node::or(eq("a", "b"), eq("c", "d"))
        );
        assert_ne!(
            Node::parenthesis(eq("a", "b")),
            eq("a", "b")
        );
        assert_ne!(
            Node::comparison(ComparisonOperator::NotEqual, "a", "b"),
            eq("a", "b")
        );
    }

    #[test]
    fn test_display() {
        let node = Node::and(
            eq("a", "b"),
            Node::parenthesis(Node::or(
                Node::comparison(ComparisonOperator::NotEqual, "c", "d"),
                Node::comparison(ComparisonOperator::In, "e", "[1, 2]"),
            )),
        );
        assert_eq!(node.to_string(), "a = b && (c != d || e ∈ [1, 2])");
    }
}
