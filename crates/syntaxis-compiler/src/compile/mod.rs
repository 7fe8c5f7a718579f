//! Grammar compilation pipeline.
//!
//! Passes, in order:
//! 1. `types`: ranked type ids, one rule id per declaration variant
//! 2. `lower`: steps and argument masks per variant, list rules on demand
//! 3. `starting`: starting token sets
//! 4. `ending`: ending token sets
//!
//! The start kind's rules become the initial rules.

mod ending;
mod expand;
mod fixpoint;
mod lists;
mod lower;
mod starting;
mod types;


use syntaxis_core::{Grammar, GrammarParts, RuleId, TokenRole, TokenTable};

use crate::declare::GrammarDecl;
use crate::error::{CompileError, Result};
use crate::trace::{CompileTracer, NoopTracer};

pub use expand::expand_tokens;

use lists::ListRules;
use lower::Lowering;

/// Compiler limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Most optional parameters one rule may declare. Each doubles the
    /// number of compiled variants.
    pub max_optionals: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { max_optionals: 16 }
    }
}

/// Compiles a grammar declaration against a token table.
pub struct Compiler<'a> {
    tokens: &'a TokenTable,
    decl: &'a GrammarDecl,
    options: CompileOptions,
}

/// Builder for `Compiler`.
#[must_use = "builder does nothing until .build() is called"]
pub struct CompilerBuilder<'a> {
    tokens: &'a TokenTable,
    decl: &'a GrammarDecl,
    options: CompileOptions,
}

impl<'a> CompilerBuilder<'a> {
    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn max_optionals(mut self, max: usize) -> Self {
        self.options.max_optionals = max;
        self
    }

    pub fn build(self) -> Compiler<'a> {
        Compiler {
            tokens: self.tokens,
            decl: self.decl,
            options: self.options,
        }
    }
}

impl<'a> Compiler<'a> {
    pub fn builder(tokens: &'a TokenTable, decl: &'a GrammarDecl) -> CompilerBuilder<'a> {
        CompilerBuilder {
            tokens,
            decl,
            options: CompileOptions::default(),
        }
    }

    pub fn new(tokens: &'a TokenTable, decl: &'a GrammarDecl) -> Self {
        Self::builder(tokens, decl).build()
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    /// Compile with `start` as the kind a parse produces.
    pub fn compile(&self, start: &str) -> Result<Grammar> {
        self.compile_with(start, &mut NoopTracer)
    }

    pub fn compile_with<T: CompileTracer>(&self, start: &str, tracer: &mut T) -> Result<Grammar> {
        let end_of_stream = self
            .tokens
            .role(TokenRole::End)
            .ok_or(CompileError::MissingEndOfStream)?;
        let unknown_start = || CompileError::UnknownStartKind {
            kind: start.to_owned(),
        };
        let start_kind = self.decl.kinds().get(start).ok_or_else(unknown_start)?;

        let first_rule = self.tokens.len() as RuleId;
        let (ranks, allocations) =
            types::allocate(self.decl, first_rule, self.options.max_optionals, tracer)?;

        let public_children = self.tokens.public_children();
        let lowering = Lowering {
            tokens: self.tokens,
            decl: self.decl,
            ranks: &ranks,
            public_children: &public_children,
        };

        let mut lists = ListRules::new(first_rule + allocations.len() as RuleId);
        let mut rules = Vec::with_capacity(allocations.len());
        for (index, allocation) in allocations.iter().enumerate() {
            let id = first_rule + index as RuleId;
            let rule = lowering.rule(id, *allocation, &mut lists, tracer)?;
            tracer.trace_rule(&rule);
            rules.push(rule);
        }
        for rule in lists.into_rules() {
            tracer.trace_rule(&rule);
            rules.push(rule);
        }

        let initial = ranks
            .rules_of_kind(start_kind, None)
            .ok_or_else(unknown_start)?;

        let nullable = fixpoint::nullable(&rules, first_rule);
        starting::compute(&mut rules, first_rule, &nullable, tracer);
        ending::compute(&mut rules, first_rule, end_of_stream, &nullable, tracer);

        Ok(Grammar::from_parts(GrammarParts {
            tokens: self.tokens.clone(),
            kinds: self.decl.kinds().clone(),
            start: start_kind,
            end_of_stream,
            ranks,
            rules,
            public_children,
            initial,
        }))
    }
}

/// Compile with default options.
pub fn compile(tokens: &TokenTable, decl: &GrammarDecl, start: &str) -> Result<Grammar> {
    Compiler::new(tokens, decl).compile(start)
}
