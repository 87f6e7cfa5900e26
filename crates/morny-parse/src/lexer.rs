use crate::error::{LexError, LexErrorKind};
use crate::token::{LexedToken, Token};
use morny_ast::span::{Pos, Span};
use tracing::{debug, trace};

/// Characters that make up operator identifiers such as `+` or `==`.
const OPERATOR_GLYPHS: &[u8] = b"!$%&*+-./|~<=>";

fn is_operator_glyph(b: u8) -> bool {
    OPERATOR_GLYPHS.contains(&b)
}

fn keyword(text: &str) -> Option<Token> {
    match text {
        "if" => Some(Token::If),
        "else" => Some(Token::Else),
        "for" => Some(Token::For),
        _ => None,
    }
}

/// Result of one lexer pass: every token that could be produced, plus the
/// problems found on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    pub tokens: Vec<LexedToken>,
    pub errors: Vec<LexError>,
}

impl Lexed {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn lex(src: &str) -> Lexed {
    Lexer::new(src).tokenize()
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: Pos,
    tokens: Vec<LexedToken>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: Pos::START,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos.index).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos.index += 1;
        if b == b'\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else if !is_continuation_byte(b) {
            self.pos.column += 1;
        }
        Some(b)
    }

    fn gather(&mut self, out: &mut String, keep: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek() {
            if !keep(b) {
                break;
            }
            out.push(b as char);
            self.bump();
        }
    }

    fn text_since(&self, start: Pos) -> &'a str {
        &self.src[start.index..self.pos.index]
    }

    fn emit(&mut self, start: Pos, token: Token) {
        let span = Span::new(start, self.pos);
        trace!(%token, start = %span.start, "token");
        self.tokens.push(LexedToken { token, span });
    }

    fn error(&mut self, start: Pos, kind: LexErrorKind) {
        self.errors
            .push(LexError::new(kind, Span::new(start, self.pos)));
    }

    pub fn tokenize(mut self) -> Lexed {
        while let Some(b) = self.peek() {
            let start = self.pos;
            match b {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.bump();
                }
                b'{' => self.single(start, Token::LeftParen),
                b'}' => self.single(start, Token::RightParen),
                b'(' => self.single(start, Token::LeftBracket),
                b')' => self.single(start, Token::RightBracket),
                b';' => self.single(start, Token::Semicolon),
                b',' => self.single(start, Token::Comma),
                b'"' => self.string(start),
                b'0'..=b'9' => self.number(start),
                b if b.is_ascii_alphabetic() || b == b'_' => self.ident(start),
                b if is_operator_glyph(b) => self.operator(start),
                _ => self.invalid(start),
            }
        }
        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "lexed source"
        );
        Lexed {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn single(&mut self, start: Pos, token: Token) {
        self.bump();
        self.emit(start, token);
    }

    // digits ['.' digits] ['f']
    fn number(&mut self, start: Pos) {
        let mut text = String::new();
        self.gather(&mut text, |b| b.is_ascii_digit());

        let fractional = self.peek() == Some(b'.');
        if fractional {
            self.bump();
            text.push('.');
            self.gather(&mut text, |b| b.is_ascii_digit());
        }

        let single = self.peek() == Some(b'f');
        if single {
            self.bump();
        }

        let token = if single {
            text.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Token::Float)
        } else if fractional {
            text.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Token::Double)
        } else {
            text.parse::<i64>().ok().map(Token::Int)
        };

        match token {
            Some(token) => self.emit(start, token),
            None => {
                let literal = self.text_since(start).to_string();
                self.error(start, LexErrorKind::InvalidNumericLiteral(literal));
            }
        }
    }

    fn ident(&mut self, start: Pos) {
        let mut text = String::new();
        self.gather(&mut text, |b| b.is_ascii_alphanumeric() || b == b'_');
        let token = keyword(&text).unwrap_or(Token::Identifier(text));
        self.emit(start, token);
    }

    fn operator(&mut self, start: Pos) {
        let mut text = String::new();
        self.gather(&mut text, is_operator_glyph);
        let token = if text == "=" {
            Token::Assign
        } else {
            Token::Identifier(text)
        };
        self.emit(start, token);
    }

    fn string(&mut self, start: Pos) {
        self.bump(); // opening quote
        let mut buf = Vec::new();
        loop {
            let Some(b) = self.bump() else {
                self.error(start, LexErrorKind::UnterminatedString);
                return;
            };
            match b {
                b'"' => break,
                b'\\' => {
                    let Some(esc) = self.bump() else {
                        self.error(start, LexErrorKind::UnterminatedString);
                        return;
                    };
                    buf.push(match esc {
                        b'n' => b'\n',
                        b't' => b'\t',
                        other => other,
                    });
                }
                other => buf.push(other),
            }
        }
        let text = String::from_utf8_lossy(&buf).into_owned();
        self.emit(start, Token::String(text));
    }

    fn invalid(&mut self, start: Pos) {
        self.bump();
        while self.peek().is_some_and(is_continuation_byte) {
            self.bump();
        }
        let ch = self
            .text_since(start)
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.error(start, LexErrorKind::UnexpectedCharacter(ch));
    }
}

fn is_continuation_byte(b: u8) -> bool {
    b & 0b1100_0000 == 0b1000_0000
}
