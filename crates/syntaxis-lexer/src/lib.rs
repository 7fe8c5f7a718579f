#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Tokenizer for syntaxis.
//!
//! Builds a `Lexer` from a `TokenTable` and turns text into a `LexerResult`:
//! token occurrences with byte offsets plus a newline index for line and
//! column lookups. Lexing never fails; unrecognized input becomes error tokens.

mod error;
pub mod indent;
mod lexer;
pub mod pattern;
mod result;
pub mod trace;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod pattern_tests;
#[cfg(test)]
mod result_tests;

pub use error::{LexerError, Result};
pub use indent::{IndentShift, IndentStack};
pub use lexer::{Lexer, LexerBuilder, LexerOptions};
pub use pattern::{PortablePattern, TokenMatcher};
pub use result::{LexerResult, LexerToken};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
