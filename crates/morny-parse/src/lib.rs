#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod error;
mod lexer;
mod parser;
mod token;

use anyhow::{bail, Result};
use morny_ast::ast::Expr;
use morny_ast::span::Span;

pub use error::{LexError, LexErrorKind, ParseError, ParseErrorKind};
pub use lexer::{lex, Lexed, Lexer};
pub use parser::{parse, Parser, MAX_NESTING_DEPTH};
pub use token::{dump, LexedToken, Token};

/// Outcome of lexing and parsing one source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub root: Expr,
    pub lex_errors: Vec<LexError>,
    pub parse_errors: Vec<ParseError>,
}

impl Parsed {
    pub fn is_ok(&self) -> bool {
        self.lex_errors.is_empty() && self.parse_errors.is_empty()
    }

    /// Messages in report order: lexer problems first.
    pub fn diagnostics(&self) -> Vec<String> {
        self.spanned_diagnostics()
            .into_iter()
            .map(|(_, msg)| msg)
            .collect()
    }

    pub fn spanned_diagnostics(&self) -> Vec<(Option<Span>, String)> {
        let lex = self.lex_errors.iter().map(|e| (Some(e.span), e.to_string()));
        let parse = self.parse_errors.iter().map(|e| (e.span, e.to_string()));
        lex.chain(parse).collect()
    }
}

/// Lex and parse `src`. Characters the lexer rejects are dropped before
/// parsing, so the tree still reflects the rest of the input.
pub fn parse_str(src: &str) -> Parsed {
    let Lexed { tokens, errors } = lex(src);
    let (root, parse_errors) = Parser::new(&tokens).parse_document();
    Parsed {
        root,
        lex_errors: errors,
        parse_errors,
    }
}

/// Like [`parse_str`], but any diagnostic is an error.
pub fn parse_str_checked(src: &str) -> Result<Expr> {
    let parsed = parse_str(src);
    if let Some((span, msg)) = parsed.spanned_diagnostics().into_iter().next() {
        match span {
            Some(span) => bail!("{}: {}", span.start, msg),
            None => bail!("{}", msg),
        }
    }
    Ok(parsed.root)
}
