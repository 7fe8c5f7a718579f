use syntaxis_core::{SourceLocation, SourceSpan, TokenId, TokenRole, TokenTable};
use syntaxis_lexer::Lexer;

use super::*;
use crate::test_utils::*;

fn span(offset: usize, len: usize) -> SourceSpan {
    SourceSpan::new(SourceLocation::new(offset, 1, offset + 1), len)
}

fn names(expected: &[&str]) -> Vec<String> {
    expected.iter().map(|s| s.to_string()).collect()
}

#[test]
fn message_without_expectations() {
    let err = ParseError::new("}", vec![], span(0, 1));
    assert_eq!(err.message(), "unexpected `}`");
}

#[test]
fn message_lists_expectations() {
    let one = ParseError::new("x", names(&["a"]), span(0, 1));
    let two = ParseError::new("x", names(&["a", "b"]), span(0, 1));
    let three = ParseError::new("x", names(&["a", "b", "c"]), span(0, 1));
    let four = ParseError::new("x", names(&["a", "b", "c", "d"]), span(0, 1));

    assert_eq!(one.message(), "expected a");
    assert_eq!(two.message(), "expected a or b");
    assert_eq!(three.message(), "expected a, b or c");
    assert_eq!(four.message(), "expected a, b, c or d");
    assert_eq!(three.to_string(), three.message());
}

#[test]
fn empty_span_widened() {
    let err = ParseError::new("", vec![], span(4, 0));
    assert_eq!(err.span.len, 1);
    assert_eq!(err.span.location.offset, 4);
}

#[test]
fn at_token_uses_default_names() {
    let lang = let_language();
    let result = lang.lex("let x = ;");

    let err = ParseError::at_token(&result, 3, &[NUMBER, IDENT], lang.tokens(), &DefaultNamer);
    assert_eq!(err.token_text, ";");
    assert_eq!(err.message(), "expected `Number` or `Ident`");
    assert_eq!(err.span, span(8, 1));
}

#[test]
fn end_of_stream_reported_by_name() {
    let lang = let_language();
    let result = lang.lex("let x = 1");
    let last = result.len() - 1;
    assert_eq!(result.token(last).token, EOS);

    let err = lang.parse_error(&result, last, &[], &DefaultNamer);
    assert_eq!(err.message(), "unexpected `EoS`");
    assert_eq!(err.span, span(9, 1));
}

struct Symbols;

impl TokenNamer for Symbols {
    fn name(&self, token: TokenId, others: &[TokenId]) -> Option<String> {
        match token {
            SEMI if others.len() > 1 => Some("a semicolon".to_owned()),
            SEMI => Some("`;`".to_owned()),
            PLUS => Some("`+`".to_owned()),
            _ => None,
        }
    }
}

#[test]
fn namer_overrides_with_context() {
    let lang = let_language();
    let result = lang.lex("let x = 1 1");

    let alone = lang.parse_error(&result, 4, &[SEMI], &Symbols);
    assert_eq!(alone.message(), "expected `;`");

    let among = lang.parse_error(&result, 4, &[PLUS, SEMI, EQ], &Symbols);
    assert_eq!(among.message(), "expected `+`, a semicolon or `Eq`");
}

#[test]
fn render_points_at_token() {
    let lang = let_language();
    let source = "let x = ;";
    let result = lang.lex(source);

    let err = lang.parse_error(&result, 3, &[NUMBER, IDENT], &DefaultNamer);
    insta::assert_snapshot!(err.render(source), @r"
    error: expected `Number` or `Ident`
      |
    1 | let x = ;
      |         ^
    ");
}

#[test]
fn render_on_later_line() {
    let lang = let_language();
    let source = "let a = 1;\nlet b = +;";
    let result = lang.lex(source);
    let plus = result.iter().position(|t| t.token == PLUS).unwrap();

    let err = lang.parse_error(&result, plus, &[NUMBER, IDENT], &DefaultNamer);
    assert_eq!(err.span.location.line, 2);
    insta::assert_snapshot!(err.render(source), @r"
    error: expected `Number` or `Ident`
      |
    2 | let b = +;
      |         ^
    ");
}

#[test]
fn render_with_path() {
    let err = ParseError::new("x", names(&["`Semi`"]), span(4, 1));
    let out = err.printer("let x").path("main.syn").render();

    insta::assert_snapshot!(out, @r"
    error: expected `Semi`
     --> main.syn:1:5
      |
    1 | let x
      |     ^
    ");
}

#[test]
fn render_colored() {
    let err = ParseError::new("x", vec![], span(0, 1));
    let out = err.printer("x").colored(true).render();

    assert!(out.contains("unexpected `x`"));
    assert!(out.contains('\x1b'));
}

#[test]
fn indent_before_multibyte_char() {
    let mut b = TokenTable::builder();
    b.token("EoS").role(TokenRole::End).add();
    b.token("Error").role(TokenRole::Error).add();
    let indent = b.token("Indent").role(TokenRole::Indent).add();
    b.token("Dedent").role(TokenRole::Dedent).add();
    b.token("Word").pattern(r"\w+").add();
    let tokens = b.build().unwrap();
    let lexer = Lexer::builder(&tokens).build().unwrap();

    let source = "a\n  é\n";
    let result = lexer.lex(source);
    assert_eq!(result.token(1).token, indent);

    let err = ParseError::at_token(&result, 1, &[], &tokens, &DefaultNamer);
    assert_eq!(err.span.range(), 4..6);

    let out = err.render(source);
    assert!(out.contains("unexpected `Indent`"));
    assert!(out.contains("2 |   é"));
}

#[test]
fn byte_span_inside_char_snapped() {
    let err = ParseError::new("é", vec![], span(0, 0));
    assert_eq!(err.span.range(), 0..1);

    let out = err.render("é");
    assert!(out.contains("1 | é"));

    let inside = ParseError::new("x", vec![], span(1, 1));
    assert!(inside.render("é!").contains("1 | é!"));
}
