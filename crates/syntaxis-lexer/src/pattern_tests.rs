use syntaxis_core::{TokenId, TokenTable};

use crate::{LexerError, TokenMatcher};

fn compile(declare: impl FnOnce(&mut syntaxis_core::TokenTableBuilder) -> TokenId) -> TokenMatcher {
    let mut b = TokenTable::builder();
    let id = declare(&mut b);
    let table = b.build().unwrap();
    TokenMatcher::compile(table.get(id).unwrap()).unwrap().unwrap()
}

#[test]
fn longest_literal_wins() {
    let m = compile(|b| b.token("Op").literals(["=", "=="]).add());

    assert_eq!(m.match_len("==", 0), 2);
    assert_eq!(m.match_len("=x", 0), 1);
    assert_eq!(m.match_len("x=", 0), 0);
    assert_eq!(m.match_len("x==", 1), 2);
    assert_eq!(m.max_len(), 2);
}

#[test]
fn case_insensitive_literal() {
    let m = compile(|b| b.token("Select").literal("select").case_insensitive().add());

    assert_eq!(m.match_len("SeLeCt *", 0), 6);
    assert_eq!(m.match_len("selec", 0), 0);
    assert!(m.starts_with('s'));
    assert!(m.starts_with('S'));
    assert!(!m.starts_with('x'));
}

#[test]
fn case_sensitive_literal_rejects_other_case() {
    let m = compile(|b| b.token("Let").literal("let").add());

    assert_eq!(m.match_len("LET", 0), 0);
    assert_eq!(m.match_len("let", 0), 3);
}

#[test]
fn by_name_matches_own_name() {
    let m = compile(|b| b.token("where").by_name().add());

    assert_eq!(m.match_len("WHERE x", 0), 5);
    assert_eq!(m.portable().to_string(), "/^where/i");
}

#[test]
fn pattern_is_anchored() {
    let m = compile(|b| b.token("Num").pattern("[0-9]+").add());

    assert_eq!(m.match_len("123abc", 0), 3);
    assert_eq!(m.match_len("abc123", 0), 0);
    assert_eq!(m.match_len("abc123", 3), 3);
    assert_eq!(m.max_len(), usize::MAX);
    assert!(m.starts_with('x'));
}

#[test]
fn pattern_start_filter() {
    let m = compile(|b| {
        b.token("Num")
            .pattern("[0-9]+")
            .starting_with("0123456789")
            .add()
    });

    assert!(m.starts_with('7'));
    assert!(!m.starts_with('a'));
}

#[test]
fn case_insensitive_pattern() {
    let m = compile(|b| b.token("Hex").pattern("0x[0-9a-f]+").case_insensitive().add());

    assert_eq!(m.match_len("0XFF;", 0), 4);
}

#[test]
fn empty_pattern_match_is_no_match() {
    let m = compile(|b| b.token("Maybe").pattern("a*").add());

    assert_eq!(m.match_len("bbb", 0), 0);
    assert_eq!(m.match_len("aab", 0), 2);
}

#[test]
fn portable_pattern_escapes_slash() {
    let m = compile(|b| b.token("Path").pattern("[a-z]+/[a-z]+").add());
    insta::assert_snapshot!(m.portable(), @r"/^[a-z]+\/[a-z]+/");
}

#[test]
fn portable_literals_longest_first() {
    let m = compile(|b| b.token("Op").literals(["+", "++", "+="]).add());
    insta::assert_snapshot!(m.portable(), @r"/^(?:\+\+|\+=|\+)/");
}

#[test]
fn invalid_pattern_is_an_error() {
    let mut b = TokenTable::builder();
    let id = b.token("Broken").pattern("(").add();
    let table = b.build().unwrap();

    let err = TokenMatcher::compile(table.get(id).unwrap()).unwrap_err();
    assert!(matches!(err, LexerError::Pattern { ref token, .. } if token == "Broken"));
}

#[test]
fn token_without_recognizer_has_no_matcher() {
    let mut b = TokenTable::builder();
    let id = b.token("EoS").add();
    let table = b.build().unwrap();

    assert!(TokenMatcher::compile(table.get(id).unwrap()).unwrap().is_none());
}
