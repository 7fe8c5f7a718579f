use std::sync::{Arc, OnceLock};

use syntaxis_compiler::{CompileError, CompileOptions};
use syntaxis_core::{GrammarError, TokenRole, TokenTable};
use syntaxis_lexer::{LexerError, LexerOptions};

use crate::test_utils::*;
use crate::{Error, Language};

fn kinds(lang: &Language, source: &str) -> Vec<String> {
    lang.lex(source)
        .iter()
        .map(|t| lang.tokens().name(t.token).to_owned())
        .collect()
}

#[test]
fn lexes_with_its_own_tokens() {
    let lang = let_language();

    assert_eq!(
        kinds(&lang, "let x = 1 + y;"),
        ["Let", "Ident", "Eq", "Number", "Plus", "Ident", "Semi", "EoS"]
    );
    assert_eq!(lang.grammar().initial_rules().len(), 1);
}

#[test]
fn shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Language>();

    static LANG: OnceLock<Language> = OnceLock::new();
    let lang = LANG.get_or_init(let_language);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || lang.lex(format!("let v = {i};")).len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 6);
    }

    let shared = Arc::new(let_language());
    let clone = Arc::clone(&shared);
    let len = std::thread::spawn(move || clone.lex("let a = b;").len())
        .join()
        .unwrap();
    assert_eq!(len, 6);
}

#[test]
fn binary_cache_roundtrip() {
    let lang = let_language();
    let bytes = lang.to_binary().unwrap();
    let restored = Language::from_binary(&bytes, LexerOptions::default()).unwrap();

    assert_eq!(restored.grammar().describe(), lang.grammar().describe());
    assert_eq!(kinds(&restored, "let q = 2;"), kinds(&lang, "let q = 2;"));
}

#[test]
fn builder_passes_options() {
    let tokens = let_tokens();
    let decl = let_decl();

    let lang = Language::builder(&tokens, &decl, "Program")
        .lexer_options(LexerOptions {
            comments: Some("#[^\n]*".to_owned()),
            ..LexerOptions::default()
        })
        .compile_options(CompileOptions { max_optionals: 4 })
        .build()
        .unwrap();

    assert_eq!(
        kinds(&lang, "let x = 1; # done"),
        ["Let", "Ident", "Eq", "Number", "Semi", "EoS"]
    );
}

#[test]
fn compile_errors_surface() {
    let err = Language::new(&let_tokens(), &let_decl(), "Nope").unwrap_err();

    assert!(matches!(
        err,
        Error::Compile(CompileError::UnknownStartKind { .. })
    ));
    assert_eq!(err.to_string(), "no rule produces start kind `Nope`");
}

#[test]
fn lexer_errors_surface() {
    let mut b = TokenTable::builder();
    b.token("EoS").role(TokenRole::End).add();
    let num = b.token("Number").pattern("[0-9]+").add();
    let tokens = b.build().unwrap();
    let mut g = syntaxis_compiler::GrammarBuilder::new();
    g.rule("Num", "Expr").terminal("value", [num]).add();

    let err = Language::new(&tokens, &g.build(), "Expr").unwrap_err();
    assert!(matches!(
        err,
        Error::Lexer(LexerError::MissingRole(TokenRole::Error))
    ));
}

#[test]
fn corrupt_cache_rejected() {
    let err = Language::from_binary(&[0xff, 0xff, 0xff], LexerOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Grammar(GrammarError::Decode(_))));
}
