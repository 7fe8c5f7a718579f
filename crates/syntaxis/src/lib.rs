#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Syntaxis: grammar and tokenizer construction toolkit.
//!
//! Declare tokens and rules, then compile them into tables a parsing
//! engine can drive:
//! - `syntaxis-core` - token table, node kinds, compiled `Grammar`
//! - `syntaxis-lexer` - pattern matching, indentation, `LexerResult`
//! - `syntaxis-compiler` - declaration builder and grammar compiler
//!
//! This crate re-exports the common surface, bundles a grammar with its
//! lexer in `Language`, and reports parse failures.

pub mod diagnostics;
mod language;

#[cfg(test)]
mod language_tests;
#[cfg(test)]
pub mod test_utils;

pub use syntaxis_compiler::{
    CompileError, CompileOptions, Compiler, GrammarBuilder, GrammarDecl, ListDelimiter,
};
pub use syntaxis_core::{
    Grammar, GrammarError, NodeKind, Rule, RuleId, SourceLocation, SourceSpan, Spanned, TokenId,
    TokenRole, TokenTable, TokenTableError,
};
pub use syntaxis_lexer::{Lexer, LexerError, LexerOptions, LexerResult, LexerToken};

pub use diagnostics::{DefaultNamer, ParseError, TokenNamer};
pub use language::{Language, LanguageBuilder};

/// Errors from building a language.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tokens(#[from] TokenTableError),

    #[error(transparent)]
    Lexer(#[from] LexerError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

pub type Result<T> = std::result::Result<T, Error>;
