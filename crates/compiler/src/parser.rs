use crate::{
    error::{QueryError, QueryResult},
    factory::PredicateFactory,
};
use model::{Value, ValueMappers};
use sift_syntax::{
    Comparison, ComparisonOperator, LogicalOperator, Node, ParseError, Parser, ParserConfig,
};
use tracing::{debug, trace};

const SET_OPEN: char = '[';
const SET_CLOSE: char = ']';
const SET_SEPARATOR: char = ',';

/// Parses query text and compiles the AST with a [`PredicateFactory`].
///
/// The parser holds no per-query state, so one instance can serve any number
/// of queries, from any number of threads when the factory allows it.
#[derive(Debug, Clone)]
pub struct QueryParser<F> {
    factory: F,
    mappers: ValueMappers,
    parser: Parser,
}

impl<F: PredicateFactory> QueryParser<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            mappers: ValueMappers::empty(),
            parser: Parser::default(),
        }
    }

    pub fn with_mappers(mut self, mappers: ValueMappers) -> Self {
        self.mappers = mappers;
        self
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::new(config);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.parser = self.parser.with_max_depth(max_depth);
        self
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn mappers(&self) -> &ValueMappers {
        &self.mappers
    }

    pub fn parse(&self, query: &str) -> QueryResult<F::Predicate> {
        let node = self.parser.parse(query)?;
        debug!("Compiling query: {}", node);
        self.compile(&node)
    }

    /// Compiles an already parsed AST.
    pub fn compile(&self, node: &Node) -> QueryResult<F::Predicate> {
        match node {
            Node::Parenthesis(inner) => Ok(self.factory.parenthesis(self.compile(inner)?)),
            Node::Logical(_) => self.compile_chain(node),
            Node::Comparison(comparison) => self.compile_comparison(comparison),
        }
    }

    /// Walks the left spine of a logical chain in a loop, so only right
    /// operands and parentheses add stack frames.
    fn compile_chain(&self, node: &Node) -> QueryResult<F::Predicate> {
        let mut spine = Vec::new();
        let mut leftmost = node;

        while let Node::Logical(logical) = leftmost {
            let right = logical
                .right()
                .ok_or_else(|| ParseError::IncompleteLogical(leftmost.to_string()))?;
            spine.push((logical.operator(), right));
            leftmost = logical.left();
        }

        let mut predicate = self.compile(leftmost)?;
        for (operator, right) in spine.into_iter().rev() {
            let right = self.compile(right)?;
            predicate = match operator {
                LogicalOperator::And => self.factory.and(predicate, right),
                LogicalOperator::Or => self.factory.or(predicate, right),
            };
        }

        Ok(predicate)
    }

    fn compile_comparison(&self, comparison: &Comparison) -> QueryResult<F::Predicate> {
        let field = comparison.field();
        let literal = comparison.literal();
        trace!("Compiling comparison: {}", comparison);

        let value = || self.mappers.map(field, literal);

        match comparison.operator() {
            ComparisonOperator::Equal => self.factory.equal(field, value()?),
            ComparisonOperator::NotEqual => self.factory.not_equal(field, value()?),
            ComparisonOperator::GreaterThan => self.factory.greater_than(field, value()?),
            ComparisonOperator::GreaterThanOrEqual => {
                self.factory.greater_than_or_equal(field, value()?)
            }
            ComparisonOperator::LessThan => self.factory.less_than(field, value()?),
            ComparisonOperator::LessThanOrEqual => self.factory.less_than_or_equal(field, value()?),
            ComparisonOperator::Like => self.factory.like(field, value()?),
            ComparisonOperator::NotLike => self.factory.not_like(field, value()?),
            ComparisonOperator::In => self.factory.is_in(field, self.map_set(field, literal)?),
        }
    }

    /// Maps each element of a `[v1, v2, ...]` literal.
    fn map_set(&self, field: &str, literal: &str) -> QueryResult<Vec<Value>> {
        let inner = literal
            .strip_prefix(SET_OPEN)
            .and_then(|rest| rest.strip_suffix(SET_CLOSE))
            .filter(|inner| !inner.trim().is_empty())
            .ok_or_else(|| ParseError::InvalidSetLiteral {
                field: field.to_string(),
                literal: literal.to_string(),
            })?;

        inner
            .split(SET_SEPARATOR)
            .map(|element| self.mappers.map(field, element.trim()).map_err(QueryError::from))
            .collect()
    }
}
