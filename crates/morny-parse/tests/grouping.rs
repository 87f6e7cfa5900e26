use morny_ast::ast::Expr;
use morny_parse::{lex, parse, parse_str, Token};

fn parse_ok(src: &str) -> Expr {
    let parsed = parse_str(src);
    assert!(parsed.is_ok(), "{src:?}: {:?}", parsed.diagnostics());
    parsed.root
}

#[test]
fn parens_are_transparent() {
    let lexed = lex("(36)");
    let toks: Vec<_> = lexed.tokens.iter().map(|t| t.token.clone()).collect();
    assert_eq!(
        toks,
        vec![Token::LeftBracket, Token::Int(36), Token::RightBracket]
    );
    let (root, diagnostics) = parse(&lexed.tokens);
    assert!(diagnostics.is_empty());
    assert_eq!(root, Expr::Integer(36));

    assert_eq!(parse_ok("((((7))))"), Expr::Integer(7));
}

#[test]
fn braces_wrap_a_sequence() {
    let lexed = lex("{3}");
    let toks: Vec<_> = lexed.tokens.iter().map(|t| t.token.clone()).collect();
    assert_eq!(toks, vec![Token::LeftParen, Token::Int(3), Token::RightParen]);
    let (root, diagnostics) = parse(&lexed.tokens);
    assert!(diagnostics.is_empty());
    assert_eq!(root, Expr::sequence(vec![Expr::Integer(3)]));
    assert_eq!(root.to_string(), "[Integer:3]");

    assert_eq!(parse_ok("{{1}}").to_string(), "[[Integer:1]]");
}

#[test]
fn comma_lists() {
    assert_eq!(
        parse_ok("{1, 2.5, x}").to_string(),
        "[Integer:1, Double:2.5, Identifier:x]"
    );
    assert_eq!(parse_ok("{1, 2,}").to_string(), "[Integer:1, Integer:2]");
    assert_eq!(parse_ok("1, 2").to_string(), "[Integer:1, Integer:2]");
    assert_eq!(
        parse_ok("{(1; 2), 3}").to_string(),
        "[[Integer:1, Integer:2], Integer:3]"
    );
}

#[test]
fn semicolons_separate_new_statements() {
    assert_eq!(
        parse_ok("(a; b)").to_string(),
        "[Identifier:a, Identifier:b]"
    );
    assert_eq!(parse_ok("(a;; b;)").to_string(), "[Identifier:a, Identifier:b]");
    assert_eq!(parse_ok("(1;)"), Expr::Integer(1));
    assert_eq!(
        parse_ok("1; {2}; x").to_string(),
        "[Integer:1, [Integer:2], Identifier:x]"
    );
    assert_eq!(parse_ok("1;"), Expr::Integer(1));
}

#[test]
fn empty_document_is_null() {
    assert_eq!(parse_ok(""), Expr::Null);
    assert_eq!(parse_ok(" \n "), Expr::Null);
    assert_eq!(parse_ok(";;"), Expr::Null);
}

#[test]
fn lambda_is_never_built() {
    fn contains_lambda(e: &Expr) -> bool {
        match e {
            Expr::Lambda => true,
            Expr::Sequence(items) => items.iter().any(contains_lambda),
            _ => false,
        }
    }
    let root = parse_ok("{a, (b; c)}; d e f");
    assert!(!contains_lambda(&root));
}
