//! Positions within a lexed buffer.

use serde::{Deserialize, Serialize};

/// A position within a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Byte offset within the buffer.
    pub offset: usize,
    /// Line number, 1-based.
    pub line: usize,
    /// Column number, 1-based.
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A location and a length within a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceSpan {
    pub location: SourceLocation,
    pub len: usize,
}

impl SourceSpan {
    pub fn new(location: SourceLocation, len: usize) -> Self {
        Self { location, len }
    }

    /// Same span, widened to one character if empty.
    ///
    /// Error reporting always highlights at least one character.
    pub fn at_least_one(self) -> Self {
        if self.len == 0 {
            Self::new(self.location, 1)
        } else {
            self
        }
    }

    /// Byte range covered by this span.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.location.offset..self.location.offset + self.len
    }
}

impl std::fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.location.line,
            self.location.column,
            self.location.column + self.len
        )
    }
}

/// A value together with the span it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spanned<T> {
    pub value: T,
    pub span: SourceSpan,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: SourceSpan) -> Self {
        Self { value, span }
    }
}
