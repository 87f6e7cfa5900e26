use crate::error::{ParseError, ParseErrorKind};
use crate::token::{LexedToken, Token};
use morny_ast::ast::Expr;
use morny_ast::span::Span;
use tracing::{debug, trace};

/// Maximum nesting of `(...)` and `{...}` groups.
pub const MAX_NESTING_DEPTH: usize = 128;

type Result<T> = std::result::Result<T, ParseError>;

/// Parse a token sequence into a tree plus diagnostic messages.
///
/// The tree is always produced. On malformed input it holds the statements
/// that parsed cleanly, and every failure is listed in the messages.
pub fn parse(tokens: &[LexedToken]) -> (Expr, Vec<String>) {
    let (root, errors) = Parser::new(tokens).parse_document();
    (root, errors.iter().map(ToString::to_string).collect())
}

pub struct Parser<'a> {
    tokens: &'a [LexedToken],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [LexedToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'a LexedToken> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&'a Token> {
        self.peek().map(|t| &t.token)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn at(&self, token: &Token) -> bool {
        self.peek_token() == Some(token)
    }

    /// End of input or a group closer.
    fn at_boundary(&self) -> bool {
        self.peek_token().map_or(true, Token::is_closer)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.peek().map(|t| t.span))
    }

    fn expect(&mut self, expected: Token) -> Result<Span> {
        match self.peek() {
            Some(t) if t.token == expected => {
                self.bump();
                Ok(t.span)
            }
            found => Err(self.error(ParseErrorKind::Required {
                expected,
                found: found.map(|t| t.token.clone()),
            })),
        }
    }

    // ======= document =======

    /// Parse every statement, recovering at `;` after a failure.
    pub fn parse_document(mut self) -> (Expr, Vec<ParseError>) {
        let mut stmts = Vec::new();
        let mut errors = Vec::new();

        while let Some(tok) = self.peek() {
            if tok.token == Token::Semicolon {
                self.bump();
                continue;
            }
            match self.statement() {
                Ok(stmt) => {
                    stmts.push(stmt);
                    if let Some(extra) = self.peek_token().filter(|t| **t != Token::Semicolon) {
                        // Keep the statement, drop the rest up to the next `;`.
                        errors.push(self.error(ParseErrorKind::TrailingInput(extra.clone())));
                        self.synchronize();
                    }
                }
                Err(err) => {
                    errors.push(err);
                    self.depth = 0;
                    self.synchronize();
                }
            }
        }

        debug!(
            statements = stmts.len(),
            errors = errors.len(),
            "parsed document"
        );
        (collapse(stmts), errors)
    }

    /// A top-level statement; `parse_document` checks what follows it.
    fn statement(&mut self) -> Result<Expr> {
        match self.assignment()? {
            Some(stmt) => Ok(stmt),
            // Only a stray closer leaves the statement empty here.
            None => Err(self.error(ParseErrorKind::UnexpectedParenthesis)),
        }
    }

    fn synchronize(&mut self) {
        let from = self.pos;
        while let Some(tok) = self.peek() {
            if tok.token == Token::Semicolon {
                break;
            }
            self.bump();
        }
        trace!(skipped = self.pos - from, "resynchronized");
    }

    // ======= grammar =======

    /// `assignment (';' assignment)*` inside a group. The document root has
    /// its own statement loop and tolerates empty input.
    fn expression(&mut self) -> Result<Expr> {
        let mut exprs = Vec::new();
        if let Some(first) = self.assignment()? {
            exprs.push(first);
            while self.at(&Token::Semicolon) {
                self.bump();
                if self.at_boundary() || self.at(&Token::Semicolon) {
                    continue;
                }
                if let Some(next) = self.assignment()? {
                    exprs.push(next);
                }
            }
        }

        if exprs.is_empty() {
            return Err(self.error(ParseErrorKind::ExpectedExpression));
        }
        Ok(collapse(exprs))
    }

    // Reserved for assignment targets; `=` is not consumed yet.
    fn assignment(&mut self) -> Result<Option<Expr>> {
        self.pattern()
    }

    // Reserved for destructuring.
    fn pattern(&mut self) -> Result<Option<Expr>> {
        let items = self.comma_separated()?;
        Ok(if items.is_empty() {
            None
        } else {
            Some(collapse(items))
        })
    }

    /// `chain (',' chain)* ','?`, or nothing in front of a closer.
    fn comma_separated(&mut self) -> Result<Vec<Expr>> {
        let mut items = Vec::new();
        if self.peek_token().is_some_and(Token::is_closer) {
            return Ok(items);
        }
        items.push(self.chain()?);
        while self.at(&Token::Comma) {
            self.bump();
            if self.at_boundary() {
                break;
            }
            items.push(self.chain()?);
        }
        Ok(items)
    }

    /// Flat juxtaposition with no precedence: `a + b * c` keeps all five
    /// operands in order. Only identifiers extend a chain, so `1 + 2` stops
    /// before the `2`.
    fn chain(&mut self) -> Result<Expr> {
        let mut operands = vec![self.operand()?];
        while matches!(self.peek_token(), Some(Token::Identifier(_))) {
            operands.push(self.operand()?);
        }

        if operands.len() == 1 {
            return Ok(operands.swap_remove(0));
        }
        Ok(Expr::sequence(operands))
    }

    // Prefix operators will hook in here.
    fn operand(&mut self) -> Result<Expr> {
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr> {
        let Some(tok) = self.peek() else {
            return Err(self.error(ParseErrorKind::InvalidEndOfParse));
        };

        let expr = match &tok.token {
            Token::Int(v) => Expr::Integer(*v),
            Token::Double(v) => Expr::Double(*v),
            // Float literals widen into Double nodes.
            Token::Float(v) => Expr::Double(f64::from(*v)),
            Token::Identifier(s) => Expr::Identifier(s.clone()),
            Token::String(s) => Expr::String(s.clone()),
            Token::LeftBracket => return self.group(),
            Token::LeftParen => return self.list(),
            Token::RightBracket | Token::RightParen => {
                return Err(self.error(ParseErrorKind::UnexpectedParenthesis))
            }
            other => return Err(self.error(ParseErrorKind::UnexpectedAtom(other.clone()))),
        };
        self.bump();
        Ok(expr)
    }

    /// `( expression )` yields the inner expression itself.
    fn group(&mut self) -> Result<Expr> {
        self.enter()?;
        self.bump(); // '('
        let inner = self.expression()?;
        self.expect(Token::RightBracket)?;
        self.depth -= 1;
        Ok(inner)
    }

    /// `{ comma_separated }` yields a sequence.
    fn list(&mut self) -> Result<Expr> {
        self.enter()?;
        self.bump(); // '{'
        let items = self.comma_separated()?;
        if items.is_empty() {
            return Err(self.error(ParseErrorKind::ExpectedList));
        }
        self.expect(Token::RightParen)?;
        self.depth -= 1;
        Ok(Expr::sequence(items))
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep(MAX_NESTING_DEPTH)));
        }
        self.depth += 1;
        Ok(())
    }
}

/// One item stands for itself, several form a sequence, none is `Null`.
fn collapse(mut items: Vec<Expr>) -> Expr {
    match items.len() {
        0 => Expr::Null,
        1 => items.swap_remove(0),
        _ => Expr::sequence(items),
    }
}
