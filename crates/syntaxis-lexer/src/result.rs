//! Lexing output.

use syntaxis_core::{SourceLocation, SourceSpan, Spanned, TokenId};

/// One token occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LexerToken {
    pub token: TokenId,
    /// Byte offset of the first character.
    pub start: usize,
    /// Length in bytes. Zero for indent, dedent and end-of-stream tokens.
    pub len: usize,
}

impl LexerToken {
    pub fn new(token: TokenId, start: usize, len: usize) -> Self {
        Self { token, start, len }
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Tokens of a buffer, with a newline index for position lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    buffer: String,
    tokens: Vec<LexerToken>,
    newlines: Vec<usize>,
    has_invalid_tokens: bool,
}

impl LexerResult {
    /// # Panics
    /// Panics if newline offsets are not strictly ascending.
    pub fn new(
        buffer: String,
        tokens: Vec<LexerToken>,
        newlines: Vec<usize>,
        has_invalid_tokens: bool,
    ) -> Self {
        assert!(
            newlines.windows(2).all(|w| w[0] < w[1]),
            "LexerResult: newline offsets must be strictly ascending"
        );
        Self {
            buffer,
            tokens,
            newlines,
            has_invalid_tokens,
        }
    }

    #[inline]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[inline]
    pub fn tokens(&self) -> &[LexerToken] {
        &self.tokens
    }

    /// Byte offsets of every `\n`, ascending.
    #[inline]
    pub fn newlines(&self) -> &[usize] {
        &self.newlines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether some input was not recognized by any token.
    #[inline]
    pub fn has_invalid_tokens(&self) -> bool {
        self.has_invalid_tokens
    }

    /// # Panics
    /// Panics if `index` is out of range.
    #[inline]
    pub fn token(&self, index: usize) -> LexerToken {
        self.tokens[index]
    }

    /// Line and column of a byte offset, both 1-based.
    ///
    /// A newline character belongs to the line it terminates. Columns count bytes.
    pub fn line_of_position(&self, offset: usize) -> (usize, usize) {
        let before = self.newlines.partition_point(|&n| n < offset);
        let column = match before {
            0 => offset + 1,
            k => offset - self.newlines[k - 1],
        };
        (before + 1, column)
    }

    pub fn location(&self, offset: usize) -> SourceLocation {
        let (line, column) = self.line_of_position(offset);
        SourceLocation::new(offset, line, column)
    }

    /// Span of the token at `index`.
    pub fn span(&self, index: usize) -> SourceSpan {
        let token = self.token(index);
        SourceSpan::new(self.location(token.start), token.len)
    }

    /// Text of the token at `index`.
    ///
    /// Empty for tokens at the end of the buffer and tokens that start on a
    /// line terminator (end-of-line tokens).
    pub fn get_string(&self, index: usize) -> &str {
        let token = self.token(index);
        match self.buffer.as_bytes().get(token.start) {
            None | Some(b'\n' | b'\r') => "",
            Some(_) => &self.buffer[token.start..token.end()],
        }
    }

    /// Text of the token at `index`, with its span.
    pub fn get_string_pos(&self, index: usize) -> Spanned<&str> {
        Spanned::new(self.get_string(index), self.span(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LexerToken> {
        self.tokens.iter()
    }
}
