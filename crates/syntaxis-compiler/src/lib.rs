#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Grammar compiler for syntaxis.
//!
//! Turns a `GrammarDecl` (rules with terminal, non-terminal and list
//! parameters) into a `Grammar` ready for a parsing engine:
//! - `declare` - grammar declarations and their builder
//! - `compile` - variant expansion, list desugaring, token sets
//! - `ebnf` - EBNF rendering for documentation
//! - `trace` - compiler instrumentation

pub mod compile;
pub mod declare;
pub mod ebnf;
mod error;
pub mod trace;

#[cfg(test)]
pub mod test_utils;

pub use compile::{CompileOptions, Compiler, CompilerBuilder, compile, expand_tokens};
pub use declare::{
    GrammarBuilder, GrammarDecl, ListDelimiter, Param, ParamShape, RuleDecl, RuleDeclBuilder,
};
pub use error::{CompileError, Result};
pub use trace::{CompileTracer, NoopTracer, PrintTracer, Verbosity};
