use std::fmt::Write;

use indoc::indoc;
use syntaxis_core::{TokenRole, TokenTable, TokenTableBuilder};

use crate::{Lexer, LexerError, LexerResult};

fn base() -> TokenTableBuilder {
    let mut b = TokenTable::builder();
    b.token("EoS").role(TokenRole::End).add();
    b.token("Error").role(TokenRole::Error).add();
    b
}

fn render(table: &TokenTable, result: &LexerResult) -> String {
    let mut out = String::new();
    for (i, t) in result.iter().enumerate() {
        writeln!(
            out,
            "{}: {} {:?}",
            t.start,
            table.name(t.token),
            result.get_string(i)
        )
        .unwrap();
    }
    out
}

fn lex(table: &TokenTable, input: &str) -> String {
    let lexer = Lexer::new(table, Default::default()).unwrap();
    render(table, &lexer.lex(input))
}

#[test]
fn longest_match_and_private_keyword() {
    let mut b = base();
    let ident = b.token("Ident").pattern("[a-zA-Z_][a-zA-Z0-9_]*").add();
    b.token("If").literal("if").private_child_of(ident).add();
    b.token("Number").pattern("[0-9]+").add();
    b.token("Eq").literal("=").add();
    b.token("EqEq").literal("==").add();
    let table = b.build().unwrap();

    insta::assert_snapshot!(lex(&table, "if x == 10 = iffy"), @r#"
    0: If "if"
    3: Ident "x"
    5: EqEq "=="
    8: Number "10"
    11: Eq "="
    13: Ident "iffy"
    17: EoS ""
    "#);
}

#[test]
fn children_refine_recursively() {
    let mut b = base();
    let ident = b.token("Ident").pattern("[a-zA-Z]+").add();
    let upper = b.token("Upper").pattern("[A-Z][a-zA-Z]*").child_of(ident).add();
    b.token("SelfType").literal("Self").child_of(upper).add();
    let table = b.build().unwrap();

    insta::assert_snapshot!(lex(&table, "Self Selfish foo"), @r#"
    0: SelfType "Self"
    5: Upper "Selfish"
    13: Ident "foo"
    16: EoS ""
    "#);
}

#[test]
fn unrecognized_runs_coalesce() {
    let mut b = base();
    b.token("Ident").pattern("[a-z]+").add();
    let table = b.build().unwrap();
    let lexer = Lexer::new(&table, Default::default()).unwrap();

    let result = lexer.lex("x$$y é z");
    assert!(result.has_invalid_tokens());
    insta::assert_snapshot!(render(&table, &result), @r#"
    0: Ident "x"
    1: Error "$$"
    3: Ident "y"
    5: Error "é"
    8: Ident "z"
    9: EoS ""
    "#);

    assert!(!lexer.lex("x y").has_invalid_tokens());
}

#[test]
fn end_of_line_tokens() {
    let mut b = base();
    b.token("Eol").role(TokenRole::EndOfLine).add();
    b.token("Ident").pattern("[a-z]+").add();
    let table = b.build().unwrap();

    insta::assert_snapshot!(lex(&table, "\na\nb\n\nc"), @r#"
    1: Ident "a"
    2: Eol ""
    3: Ident "b"
    4: Eol ""
    6: Ident "c"
    7: Eol ""
    7: EoS ""
    "#);
}

#[test]
fn crlf_is_one_terminator() {
    let mut b = base();
    let eol = b.token("Eol").role(TokenRole::EndOfLine).add();
    b.token("Ident").pattern("[a-z]+").add();
    let table = b.build().unwrap();
    let lexer = Lexer::new(&table, Default::default()).unwrap();

    let result = lexer.lex("a\r\nb");
    assert_eq!(result.newlines(), &[2]);
    assert_eq!(result.token(1).token, eol);
    assert_eq!((result.token(1).start, result.token(1).len), (1, 2));
    assert_eq!(result.get_string(1), "");
    assert_eq!(result.line_of_position(3), (2, 1));
}

#[test]
fn indentation_blocks() {
    let mut b = base();
    b.token("Indent").role(TokenRole::Indent).add();
    b.token("Dedent").role(TokenRole::Dedent).add();
    b.token("Eol").role(TokenRole::EndOfLine).add();
    let ident = b.token("Ident").pattern("[a-z]+").add();
    b.token("If").literal("if").private_child_of(ident).add();
    let table = b.build().unwrap();

    let input = indoc! {"
        if a
          b
          if c
            d
        e
    "};

    insta::assert_snapshot!(lex(&table, input), @r#"
    0: If "if"
    3: Ident "a"
    4: Eol ""
    7: Indent ""
    7: Ident "b"
    8: Eol ""
    11: If "if"
    14: Ident "c"
    15: Eol ""
    20: Indent ""
    20: Ident "d"
    21: Eol ""
    22: Dedent ""
    22: Dedent ""
    22: Ident "e"
    23: Eol ""
    24: EoS ""
    "#);
}

#[test]
fn blank_and_comment_lines_keep_indentation() {
    let mut b = base();
    b.token("Indent").role(TokenRole::Indent).add();
    b.token("Dedent").role(TokenRole::Dedent).add();
    b.token("Eol").role(TokenRole::EndOfLine).add();
    b.token("Ident").pattern("[a-z]+").add();
    let table = b.build().unwrap();
    let lexer = Lexer::builder(&table).comments("#[^\n]*").build().unwrap();

    let result = lexer.lex("a\n\n    # note\n  b\n");
    assert_eq!(result.newlines(), &[1, 2, 13, 17]);
    insta::assert_snapshot!(render(&table, &result), @r#"
    0: Ident "a"
    1: Eol ""
    16: Indent ""
    16: Ident "b"
    17: Eol ""
    18: Dedent ""
    18: EoS ""
    "#);
}

#[test]
fn dedents_close_before_end_of_stream() {
    let mut b = base();
    b.token("Indent").role(TokenRole::Indent).add();
    b.token("Dedent").role(TokenRole::Dedent).add();
    b.token("Ident").pattern("[a-z]+").add();
    let table = b.build().unwrap();

    insta::assert_snapshot!(lex(&table, "a\n\tb\n\t\tc"), @r#"
    0: Ident "a"
    3: Indent ""
    3: Ident "b"
    7: Indent ""
    7: Ident "c"
    8: Dedent ""
    8: Dedent ""
    8: EoS ""
    "#);
}

#[test]
fn escaped_newline_joins_lines() {
    let mut b = base();
    b.token("Indent").role(TokenRole::Indent).add();
    b.token("Dedent").role(TokenRole::Dedent).add();
    b.token("Eol").role(TokenRole::EndOfLine).add();
    b.token("Ident").pattern("[a-z]+").add();
    let table = b.build().unwrap();
    let lexer = Lexer::builder(&table).escape_newlines(true).build().unwrap();

    let result = lexer.lex("a \\\n b\nc");
    assert_eq!(result.newlines(), &[3, 6]);
    assert_eq!(result.line_of_position(5), (2, 2));
    insta::assert_snapshot!(render(&table, &result), @r#"
    0: Ident "a"
    5: Ident "b"
    6: Eol ""
    7: Ident "c"
    8: Eol ""
    8: EoS ""
    "#);
}

#[test]
fn backslash_without_escaping_is_an_error() {
    let mut b = base();
    b.token("Ident").pattern("[a-z]+").add();
    let table = b.build().unwrap();

    insta::assert_snapshot!(lex(&table, "a \\\nb"), @r#"
    0: Ident "a"
    2: Error "\\"
    4: Ident "b"
    5: EoS ""
    "#);
}

#[test]
fn multi_line_tokens_record_newlines() {
    let mut b = base();
    b.token("Str").pattern(r#""[^"]*""#).add();
    let table = b.build().unwrap();
    let lexer = Lexer::new(&table, Default::default()).unwrap();

    let result = lexer.lex("\"a\nb\" \"c\"");
    assert_eq!(result.newlines(), &[2]);
    assert_eq!(result.len(), 3);
    assert_eq!(result.location(result.token(1).start).line, 2);
}

#[test]
fn empty_input_yields_end_of_stream() {
    let mut b = base();
    b.token("Eol").role(TokenRole::EndOfLine).add();
    let table = b.build().unwrap();

    insta::assert_snapshot!(lex(&table, ""), @r#"0: EoS """#);
}

#[test]
fn missing_roles_rejected() {
    let mut b = TokenTable::builder();
    b.token("Error").role(TokenRole::Error).add();
    let table = b.build().unwrap();
    let err = Lexer::new(&table, Default::default()).unwrap_err();
    insta::assert_snapshot!(err, @"token table declares no end-of-stream token");

    let mut b = TokenTable::builder();
    b.token("EoS").role(TokenRole::End).add();
    let table = b.build().unwrap();
    let err = Lexer::new(&table, Default::default()).unwrap_err();
    assert_eq!(err, LexerError::MissingRole(TokenRole::Error));
}

#[test]
fn invalid_comment_pattern_rejected() {
    let table = base().build().unwrap();
    let err = Lexer::builder(&table).comments("[").build().unwrap_err();
    assert!(matches!(err, LexerError::CommentPattern { .. }));
}

#[test]
fn zero_tab_width_rejected() {
    let table = base().build().unwrap();
    let err = Lexer::builder(&table).tab_width(0).build().unwrap_err();
    assert_eq!(err, LexerError::ZeroTabWidth);
}

#[test]
fn lexer_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Lexer>();
    assert_send_sync::<LexerResult>();
}
