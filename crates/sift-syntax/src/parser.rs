use crate::{
    ast::{
        node::{Logical, Node},
        operator::{LogicalOperator, parse_node},
    },
    error::{ParseError, ParseResult},
    lexer::{
        Lexer,
        token::{Token, TokenKind},
    },
};
use std::collections::VecDeque;
use tracing::{debug, trace};

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_HEIGHT: usize = 256;

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest parenthesis nesting accepted before the query is rejected.
    pub max_depth: usize,
    /// Tallest AST accepted, counting every logical and parenthesis level.
    /// A chain of `n` logical operators is `n` levels tall.
    pub max_height: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

/// Parse query text into an AST with the default configuration.
pub fn parse(input: &str) -> ParseResult<Node> {
    Parser::default().parse(input)
}

/// Turns query text into a single root [`Node`].
///
/// Logical operators have no precedence: each `&&` or `||` takes everything
/// parsed so far as its left operand, so `a = b && c != d || e > f` reads as
/// `(a = b && c != d) || e > f`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.config.max_height = max_height;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, input: &str) -> ParseResult<Node> {
        debug!("Parsing query: {}", input);

        let mut tokens: VecDeque<Token> = Lexer::new().tokenize(input).into();
        trace!("Tokenized query into {} tokens", tokens.len());

        let node = QueryBuilder {
            query: input,
            config: self.config,
        }
        .build(&mut tokens, 0)?
        .node;

        debug!("Parsed query into: {}", node);
        Ok(node)
    }
}

struct QueryBuilder<'a> {
    query: &'a str,
    config: ParserConfig,
}

/// A node together with the height of the tree below it.
struct Subtree {
    node: Node,
    height: usize,
}

impl Subtree {
    fn leaf(node: Node) -> Self {
        Self { node, height: 0 }
    }
}

impl QueryBuilder<'_> {
    fn build(&self, tokens: &mut VecDeque<Token>, depth: usize) -> ParseResult<Subtree> {
        let mut current: Option<Subtree> = None;

        while let Some(token) = tokens.pop_front() {
            match token.kind {
                TokenKind::LeftParen => {
                    if depth + 1 > self.config.max_depth {
                        return Err(self.too_deep(self.config.max_depth));
                    }

                    let mut sub_tokens = self.sub_expression(tokens)?;
                    let inner = self.build(&mut sub_tokens, depth + 1)?;
                    let parenthesis = self.checked(Subtree {
                        node: Node::Parenthesis(Box::new(inner.node)),
                        height: inner.height + 1,
                    })?;
                    current = Some(self.attach(current, parenthesis)?);
                }
                TokenKind::RightParen => {
                    return Err(self.illegal("unbalanced ')'"));
                }
                TokenKind::And => {
                    current = Some(self.open_logical(current, LogicalOperator::And)?);
                }
                TokenKind::Or => {
                    current = Some(self.open_logical(current, LogicalOperator::Or)?);
                }
                TokenKind::Fragment(fragment) => {
                    let node = parse_node(&fragment)?;
                    current = Some(self.attach(current, Subtree::leaf(node))?);
                }
            }
        }

        match current {
            Some(tree) if tree.node.is_valid() => Ok(tree),
            Some(tree) if tree.node.is_open() => Err(self.illegal("missing right operand")),
            Some(_) => Err(self.illegal("incomplete expression")),
            None => Err(self.illegal("empty expression")),
        }
    }

    fn open_logical(&self, current: Option<Subtree>, operator: LogicalOperator) -> ParseResult<Subtree> {
        match current {
            Some(tree) if !tree.node.is_open() => self.checked(Subtree {
                node: Node::Logical(Logical::open(operator, tree.node)),
                height: tree.height + 1,
            }),
            Some(_) => Err(self.illegal(format!("consecutive logical operators at '{operator}'"))),
            None => Err(self.illegal(format!("missing left operand for '{operator}'"))),
        }
    }

    /// Hooks `tree` into the expression parsed so far.
    fn attach(&self, current: Option<Subtree>, tree: Subtree) -> ParseResult<Subtree> {
        match current {
            None => Ok(tree),
            Some(Subtree {
                node: Node::Logical(logical),
                height,
            }) if logical.is_open() => self.checked(Subtree {
                node: Node::Logical(logical.with_right(tree.node)),
                height: height.max(tree.height + 1),
            }),
            Some(_) => Err(self.illegal(format!("missing logical operator before '{}'", tree.node))),
        }
    }

    fn checked(&self, tree: Subtree) -> ParseResult<Subtree> {
        if tree.height > self.config.max_height {
            return Err(self.too_deep(self.config.max_height));
        }
        Ok(tree)
    }

    /// Takes tokens up to the `)` that balances an already consumed `(`.
    fn sub_expression(&self, tokens: &mut VecDeque<Token>) -> ParseResult<VecDeque<Token>> {
        let mut open = 1;
        let mut sub_tokens = VecDeque::new();

        while let Some(token) = tokens.pop_front() {
            match token.kind {
                TokenKind::LeftParen => open += 1,
                TokenKind::RightParen => {
                    open -= 1;
                    if open == 0 {
                        return Ok(sub_tokens);
                    }
                }
                _ => {}
            }

            sub_tokens.push_back(token);
        }

        Err(self.illegal("unbalanced '('"))
    }

    fn illegal(&self, reason: impl Into<String>) -> ParseError {
        ParseError::illegal_query(self.query, reason)
    }

    fn too_deep(&self, max_depth: usize) -> ParseError {
        ParseError::NestingTooDeep {
            query: self.query.to_string(),
            max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::operator::ComparisonOperator;

    #[test]
    fn test_parse_single_comparison() {
        assert_eq!(
            parse("a = b").unwrap(),
            Node::comparison(ComparisonOperator::Equal, "a", "b")
        );
    }

    #[test]
    fn test_parser_config_default() {
        assert_eq!(Parser::default().config().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(Parser::default().with_max_depth(3).config().max_depth, 3);
        assert_eq!(Parser::default().config().max_height, DEFAULT_MAX_HEIGHT);
        assert_eq!(Parser::default().with_max_height(5).config().max_height, 5);
    }

    #[test]
    fn test_long_logical_chain_is_rejected() {
        let query = vec!["a = b"; 5000].join(" && ");
        let err = parse(&query).unwrap_err();
        assert!(matches!(
            err,
            ParseError::NestingTooDeep { max_depth: DEFAULT_MAX_HEIGHT, .. }
        ));
    }

    #[test]
    fn test_logical_chain_within_height() {
        let parser = Parser::default().with_max_height(3);

        assert!(parser.parse("a = b && c = d || e = f && g = h").is_ok());
        assert!(matches!(
            parser.parse("a = b && c = d || e = f && g = h || i = j"),
            Err(ParseError::NestingTooDeep { max_depth: 3, .. })
        ));
    }

    #[test]
    fn test_height_counts_parenthesis_and_chains() {
        let parser = Parser::default().with_max_height(3);

        // Or -> Parenthesis -> And -> comparison
        assert!(parser.parse("x = y || (a = b && c = d)").is_ok());
        assert!(parser.parse("x = y || ((a = b && c = d))").is_err());
    }

    #[test]
    fn test_max_depth_is_enforced() {
        let parser = Parser::new(ParserConfig {
            max_depth: 2,
            ..ParserConfig::default()
        });

        assert!(parser.parse("((a = b))").is_ok());
        assert_eq!(
            parser.parse("(((a = b)))"),
            Err(ParseError::NestingTooDeep {
                query: "(((a = b)))".to_string(),
                max_depth: 2
            })
        );
    }

    #[test]
    fn test_zero_depth_rejects_any_parenthesis() {
        let parser = Parser::default().with_max_depth(0);
        assert!(parser.parse("a = b").is_ok());
        assert!(parser.parse("(a = b)").is_err());
    }

    #[test]
    fn test_consecutive_logical_operators() {
        let err = parse("a = b && || c = d").unwrap_err();
        assert!(matches!(err, ParseError::IllegalQuery { .. }));
    }

    #[test]
    fn test_stray_close_parenthesis() {
        let err = parse("a = b)").unwrap_err();
        assert_eq!(err, ParseError::illegal_query("a = b)", "unbalanced ')'"));
    }
}
