use crate::{
    ast::operator::{AND, OR},
    lexer::token::{Token, TokenKind},
};

pub mod token;

const PAREN_OPEN: &str = "(";
const PAREN_CLOSE: &str = ")";

/// Splits query text on `&&`, `||`, `(` and `)`.
///
/// The split is purely textual: a literal that itself contains one of the
/// delimiters is cut at that point. Whitespace-only fragments are dropped
/// and the remaining fragments keep their surrounding whitespace.
pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer { tokens: Vec::new() }
    }

    pub fn tokenize(&mut self, input: &str) -> Vec<Token> {
        self.tokens.clear();

        let mut fragment_start = 0;
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            let delimiter = [
                (AND, TokenKind::And),
                (OR, TokenKind::Or),
                (PAREN_OPEN, TokenKind::LeftParen),
                (PAREN_CLOSE, TokenKind::RightParen),
            ]
            .into_iter()
            .find(|(symbol, _)| rest.starts_with(symbol));

            match delimiter {
                Some((symbol, kind)) => {
                    self.add_fragment(&input[fragment_start..pos], fragment_start);
                    self.tokens.push(Token::new(kind, symbol, pos));
                    pos += symbol.len();
                    fragment_start = pos;
                }
                None => {
                    // Advance by a whole character; operators like `≈` are multi-byte.
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        self.add_fragment(&input[fragment_start..], fragment_start);

        self.tokens.clone()
    }

    fn add_fragment(&mut self, text: &str, start: usize) {
        if text.trim().is_empty() {
            return;
        }

        self.tokens
            .push(Token::new(TokenKind::Fragment(text.to_string()), text, start));
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer { tokens: vec![] }
    }
}
