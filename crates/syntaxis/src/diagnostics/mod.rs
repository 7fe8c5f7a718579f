//! Parse failure reporting.
//!
//! A parsing engine that rejects a token builds a `ParseError` from the
//! lexer result: the offending text, the display names of the tokens it
//! would have accepted, and where it happened. `TokenNamer` decides how
//! expected tokens are named.

mod namer;
mod printer;

#[cfg(test)]
mod tests;

use syntaxis_core::{SourceSpan, TokenId, TokenTable};
use syntaxis_lexer::LexerResult;

pub use namer::{DefaultNamer, TokenNamer};
pub use printer::ParseErrorPrinter;

/// A token the parser could not accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message())]
pub struct ParseError {
    /// Source text of the unexpected token.
    pub token_text: String,
    /// Display names of the acceptable tokens, in order.
    pub expected: Vec<String>,
    /// Never empty.
    pub span: SourceSpan,
}

impl ParseError {
    /// An empty `span` is widened to one byte.
    pub fn new(token_text: impl Into<String>, expected: Vec<String>, span: SourceSpan) -> Self {
        Self {
            token_text: token_text.into(),
            expected,
            span: span.at_least_one(),
        }
    }

    /// Failure at the `index`-th token of `result`.
    ///
    /// Tokens without text (end of stream, end of line) are reported by
    /// their display name.
    pub fn at_token(
        result: &LexerResult,
        index: usize,
        expected: &[TokenId],
        tokens: &TokenTable,
        namer: &impl TokenNamer,
    ) -> Self {
        let found = result.get_string_pos(index);
        let token_text = match found.value {
            "" => tokens.name(result.token(index).token).to_owned(),
            text => text.to_owned(),
        };
        let expected = expected
            .iter()
            .map(|&t| {
                namer
                    .name(t, expected)
                    .unwrap_or_else(|| DefaultNamer.default_name(t, tokens))
            })
            .collect();
        let mut span = found.span;
        if span.len == 0 {
            span.len = char_len_at(result.buffer(), span.location.offset);
        }
        Self::new(token_text, expected, span)
    }

    pub fn message(&self) -> String {
        match self.expected.as_slice() {
            [] => format!("unexpected `{}`", self.token_text),
            [only] => format!("expected {only}"),
            [init @ .., last] => format!("expected {} or {last}", init.join(", ")),
        }
    }

    pub fn printer<'s>(&self, source: &'s str) -> ParseErrorPrinter<'_, 's> {
        ParseErrorPrinter::new(self, source)
    }

    /// Annotated snippet of `source` pointing at the error.
    pub fn render(&self, source: &str) -> String {
        self.printer(source).render()
    }
}

/// UTF-8 width of the character at `offset`, 1 past the end.
fn char_len_at(buffer: &str, offset: usize) -> usize {
    buffer
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(1, char::len_utf8)
}
