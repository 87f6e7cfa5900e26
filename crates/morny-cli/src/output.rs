use anyhow::Result;
use clap::ValueEnum;
use morny_ast::ast::Expr;
use morny_ast::span::Span;
use morny_parse::{dump, Lexed, LexedToken, Parsed};
use serde::Serialize;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Json,
}

/// Text for stdout, diagnostics for stderr.
#[derive(Debug)]
pub struct Rendered {
    pub body: String,
    pub diagnostics: Vec<String>,
    pub failed: bool,
}

#[derive(Serialize)]
struct Diagnostic {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<Span>,
}

#[derive(Serialize)]
struct TokenReport<'a> {
    tokens: &'a [LexedToken],
    diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
struct TreeReport<'a> {
    root: &'a Expr,
    dump: String,
    diagnostics: Vec<Diagnostic>,
}

/// `line:column: message`, or the bare message when the input ended early.
pub fn format_diagnostic(span: Option<Span>, message: &str) -> String {
    match span {
        Some(span) => format!("{}: {}", span.start, message),
        None => message.to_string(),
    }
}

fn collect(spanned: Vec<(Option<Span>, String)>, format: Format) -> (Vec<String>, Vec<Diagnostic>) {
    match format {
        Format::Pretty => (
            spanned
                .iter()
                .map(|(span, msg)| format_diagnostic(*span, msg))
                .collect(),
            Vec::new(),
        ),
        Format::Json => (
            Vec::new(),
            spanned
                .into_iter()
                .map(|(span, message)| Diagnostic { message, span })
                .collect(),
        ),
    }
}

pub fn render_tokens(lexed: &Lexed, format: Format) -> Result<Rendered> {
    let spanned = lexed
        .errors
        .iter()
        .map(|e| (Some(e.span), e.to_string()))
        .collect();
    let failed = !lexed.is_ok();
    let (diagnostics, structured) = collect(spanned, format);
    let body = match format {
        Format::Pretty => dump(&lexed.tokens),
        Format::Json => serde_json::to_string_pretty(&TokenReport {
            tokens: &lexed.tokens,
            diagnostics: structured,
        })?,
    };
    Ok(Rendered {
        body,
        diagnostics,
        failed,
    })
}

pub fn render_tree(parsed: &Parsed, format: Format) -> Result<Rendered> {
    let failed = !parsed.is_ok();
    let (diagnostics, structured) = collect(parsed.spanned_diagnostics(), format);
    let body = match format {
        Format::Pretty => parsed.root.to_string(),
        Format::Json => serde_json::to_string_pretty(&TreeReport {
            root: &parsed.root,
            dump: parsed.root.to_string(),
            diagnostics: structured,
        })?,
    };
    Ok(Rendered {
        body,
        diagnostics,
        failed,
    })
}
