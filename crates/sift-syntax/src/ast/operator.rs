use crate::{
    ast::node::{Comparison, Node},
    error::{ParseError, ParseResult},
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Comparison operators recognised inside a query part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    NotLike,
    In,
}

/// Logical operators joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
}

pub const AND: &str = "&&";
pub const OR: &str = "||";

const EXPECTED_TOKENS: usize = 2;

fn base_matcher(symbol: &str) -> Regex {
    let pattern = format!(r"(?s)^.+\s*{}\s*.+$", regex::escape(symbol));
    // The pattern is built from escaped constants only.
    Regex::new(&pattern).unwrap_or_else(|err| panic!("invalid operator pattern {pattern}: {err}"))
}

lazy_static! {
    static ref MATCH_EQUAL: Regex = base_matcher("=");
    static ref MATCH_NOT_EQUAL: Regex = base_matcher("!=");
    static ref MATCH_GREATER_THAN: Regex = base_matcher(">");
    static ref MATCH_GREATER_THAN_OR_EQUAL: Regex = base_matcher(">=");
    static ref MATCH_LESS_THAN: Regex = base_matcher("<");
    static ref MATCH_LESS_THAN_OR_EQUAL: Regex = base_matcher("<=");
    static ref MATCH_LIKE: Regex = base_matcher("≈");
    static ref MATCH_NOT_LIKE: Regex = base_matcher("!≈");
    static ref MATCH_IN: Regex = base_matcher("∈");
}

impl ComparisonOperator {
    /// Catalog order. The first operator that matches a fragment wins.
    pub const ALL: [ComparisonOperator; 9] = [
        ComparisonOperator::Equal,
        ComparisonOperator::NotEqual,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::GreaterThanOrEqual,
        ComparisonOperator::LessThan,
        ComparisonOperator::LessThanOrEqual,
        ComparisonOperator::Like,
        ComparisonOperator::NotLike,
        ComparisonOperator::In,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::Like => "≈",
            ComparisonOperator::NotLike => "!≈",
            ComparisonOperator::In => "∈",
        }
    }

    /// Operators whose symbol contains this operator's symbol. A fragment
    /// matching any of them is never claimed by `self`.
    pub fn excludes(&self) -> &'static [ComparisonOperator] {
        match self {
            ComparisonOperator::Equal => &[
                ComparisonOperator::NotEqual,
                ComparisonOperator::GreaterThanOrEqual,
                ComparisonOperator::LessThanOrEqual,
            ],
            ComparisonOperator::GreaterThan => &[ComparisonOperator::GreaterThanOrEqual],
            ComparisonOperator::LessThan => &[ComparisonOperator::LessThanOrEqual],
            ComparisonOperator::Like => &[ComparisonOperator::NotLike],
            _ => &[],
        }
    }

    fn matcher(&self) -> &'static Regex {
        match self {
            ComparisonOperator::Equal => &MATCH_EQUAL,
            ComparisonOperator::NotEqual => &MATCH_NOT_EQUAL,
            ComparisonOperator::GreaterThan => &MATCH_GREATER_THAN,
            ComparisonOperator::GreaterThanOrEqual => &MATCH_GREATER_THAN_OR_EQUAL,
            ComparisonOperator::LessThan => &MATCH_LESS_THAN,
            ComparisonOperator::LessThanOrEqual => &MATCH_LESS_THAN_OR_EQUAL,
            ComparisonOperator::Like => &MATCH_LIKE,
            ComparisonOperator::NotLike => &MATCH_NOT_LIKE,
            ComparisonOperator::In => &MATCH_IN,
        }
    }

    pub fn matches(&self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        self.matcher().is_match(fragment) && !self.excludes().iter().any(|op| op.matches(fragment))
    }

    /// Splits `fragment` on this operator's symbol into a comparison node.
    pub fn parse(&self, fragment: &str) -> ParseResult<Node> {
        let fragment = fragment.trim();
        if !self.matches(fragment) {
            return Err(ParseError::IllegalQueryPart(fragment.to_string()));
        }

        let tokens: Vec<&str> = fragment.split(self.symbol()).map(str::trim).collect();
        if tokens.len() != EXPECTED_TOKENS || tokens.iter().any(|t| t.is_empty()) {
            return Err(ParseError::InvalidQueryPart(fragment.to_string()));
        }

        Ok(Node::Comparison(Comparison::new(*self, tokens[0], tokens[1])))
    }
}

/// Parses a single comparison fragment such as `age >= 10`.
pub fn parse_node(fragment: &str) -> ParseResult<Node> {
    let fragment = fragment.trim();
    let operator = ComparisonOperator::ALL
        .iter()
        .find(|op| op.matches(fragment))
        .ok_or_else(|| ParseError::IllegalQueryPart(fragment.to_string()))?;

    trace!("Query part '{}' matched operator {:?}", fragment, operator);
    operator.parse(fragment)
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl LogicalOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicalOperator::And => AND,
            LogicalOperator::Or => OR,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
