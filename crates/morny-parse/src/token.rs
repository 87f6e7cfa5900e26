use morny_ast::span::Span;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Token {
    // literals
    String(String),
    /// Names and operator glyphs other than a bare `=`.
    Identifier(String),
    Int(i64),
    Float(f32),
    Double(f64),
    // punctuation
    LeftParen,    // {
    RightParen,   // }
    LeftBracket,  // (
    RightBracket, // )
    Semicolon,
    Comma,
    Assign,
    // keywords
    If,
    Else,
    For,
}

impl Token {
    /// True for the tokens that close a group.
    pub fn is_closer(&self) -> bool {
        matches!(self, Token::RightParen | Token::RightBracket)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "String: {}", s),
            Token::Identifier(s) => write!(f, "Identifier: {}", s),
            Token::Int(v) => write!(f, "Int: {}", v),
            Token::Float(v) => write!(f, "Float: {}", v),
            Token::Double(v) => write!(f, "Double: {}", v),
            Token::LeftParen => write!(f, "{{"),
            Token::RightParen => write!(f, "}}"),
            Token::LeftBracket => write!(f, "("),
            Token::RightBracket => write!(f, ")"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Assign => write!(f, "="),
            Token::If => write!(f, "If"),
            Token::Else => write!(f, "Else"),
            Token::For => write!(f, "For"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexedToken {
    pub token: Token,
    pub span: Span,
}

/// Comma-separated token dump for debugging output.
pub fn dump(tokens: &[LexedToken]) -> String {
    tokens
        .iter()
        .map(|t| t.token.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
