//! Lexer and parser errors.
//!
//! Both stages report problems as data. The `Display` text of an error kind
//! is the diagnostic message handed back to callers.

use crate::token::Token;
use morny_ast::span::Span;
use thiserror::Error;

/// A problem found while scanning. Scanning continues after it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// The character is skipped.
    #[error("Invalid character '{0}'")]
    UnexpectedCharacter(char),

    /// Integer overflow or a float literal that does not fit its type.
    #[error("Invalid numeric literal '{0}'")]
    InvalidNumericLiteral(String),

    #[error("Unterminated string literal")]
    UnterminatedString,
}

/// A grammar violation. `span` is `None` when the input ended early.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Option<Span>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("Required: {expected}, found {}", found_text(.found))]
    Required {
        expected: Token,
        found: Option<Token>,
    },

    #[error("Required: end of input, found {0}")]
    TrailingInput(Token),

    #[error("Unexpected atom")]
    UnexpectedAtom(Token),

    #[error("Unexpected parenthesis")]
    UnexpectedParenthesis,

    #[error("Expected list")]
    ExpectedList,

    #[error("Expected expression")]
    ExpectedExpression,

    #[error("Invalid end of parse")]
    InvalidEndOfParse,

    #[error("Nesting depth limit exceeded ({0})")]
    NestingTooDeep(usize),
}

fn found_text(found: &Option<Token>) -> String {
    match found {
        Some(tok) => tok.to_string(),
        None => "end of input".to_string(),
    }
}
