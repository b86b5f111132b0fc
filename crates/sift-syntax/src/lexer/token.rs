use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Delimiters
    And,        // &&
    Or,         // ||
    LeftParen,  // (
    RightParen, // )

    // Anything between delimiters, e.g. `age >= 10`
    Fragment(String),
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, start: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            span: (start, start + lexeme.len()),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::And => write!(f, "&&"),
            TokenKind::Or => write!(f, "||"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Fragment(s) => write!(f, "{}", s),
        }
    }
}
