//! A compiled grammar bundled with its lexer.

use syntaxis_compiler::{CompileOptions, Compiler, GrammarDecl};
use syntaxis_core::{Grammar, TokenId, TokenTable};
use syntaxis_lexer::{Lexer, LexerOptions, LexerResult, Tracer};

use crate::Result;
use crate::diagnostics::{ParseError, TokenNamer};

/// Everything needed to tokenize and parse one language.
///
/// Immutable once built. Build it once (for instance in a `OnceLock`)
/// and share it between threads.
#[derive(Debug)]
pub struct Language {
    grammar: Grammar,
    lexer: Lexer,
}

/// Builder for `Language`.
#[must_use = "builder does nothing until .build() is called"]
pub struct LanguageBuilder<'a> {
    tokens: &'a TokenTable,
    decl: &'a GrammarDecl,
    start: &'a str,
    compile: CompileOptions,
    lexer: LexerOptions,
}

impl<'a> LanguageBuilder<'a> {
    pub fn compile_options(mut self, options: CompileOptions) -> Self {
        self.compile = options;
        self
    }

    pub fn lexer_options(mut self, options: LexerOptions) -> Self {
        self.lexer = options;
        self
    }

    pub fn build(self) -> Result<Language> {
        let grammar = Compiler::builder(self.tokens, self.decl)
            .options(self.compile)
            .build()
            .compile(self.start)?;
        Language::from_grammar(grammar, self.lexer)
    }
}

impl Language {
    /// Compile `decl` against `tokens`, parsing `start`.
    pub fn builder<'a>(
        tokens: &'a TokenTable,
        decl: &'a GrammarDecl,
        start: &'a str,
    ) -> LanguageBuilder<'a> {
        LanguageBuilder {
            tokens,
            decl,
            start,
            compile: CompileOptions::default(),
            lexer: LexerOptions::default(),
        }
    }

    pub fn new(tokens: &TokenTable, decl: &GrammarDecl, start: &str) -> Result<Self> {
        Self::builder(tokens, decl, start).build()
    }

    /// Wrap an already compiled grammar.
    pub fn from_grammar(grammar: Grammar, options: LexerOptions) -> Result<Self> {
        let lexer = Lexer::new(grammar.tokens(), options)?;
        Ok(Self { grammar, lexer })
    }

    /// Restore a language from `to_binary` output. Patterns are recompiled.
    pub fn from_binary(bytes: &[u8], options: LexerOptions) -> Result<Self> {
        Self::from_grammar(Grammar::from_binary(bytes)?, options)
    }

    /// The compiled grammar, for caching.
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(self.grammar.to_binary()?)
    }

    #[inline]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    #[inline]
    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    #[inline]
    pub fn tokens(&self) -> &TokenTable {
        self.grammar.tokens()
    }

    pub fn lex(&self, source: impl Into<String>) -> LexerResult {
        self.lexer.lex(source)
    }

    pub fn lex_with<T: Tracer>(&self, source: impl Into<String>, tracer: &mut T) -> LexerResult {
        self.lexer.lex_with(source, tracer)
    }

    /// Failure at the `index`-th token of `result`.
    pub fn parse_error(
        &self,
        result: &LexerResult,
        index: usize,
        expected: &[TokenId],
        namer: &impl TokenNamer,
    ) -> ParseError {
        ParseError::at_token(result, index, expected, self.tokens(), namer)
    }
}
