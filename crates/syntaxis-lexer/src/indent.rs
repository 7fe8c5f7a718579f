//! Indentation tracking.
//!
//! Widths of the open blocks are kept on a stack whose bottom is a sentinel
//! 0. Each significant line start reports its width and gets back the
//! dedents and indent to emit before its first token:
//!
//! ```text
//! A        (0)
//!   B      (2)   indent
//!     C    (4)   indent
//!   D      (2)   dedent
//!      E   (5)   indent
//! F        (0)   dedent dedent
//!   H      (2)   indent
//!  I       (1)   dedent indent
//!                dedent (end of stream)
//! ```

/// What a line start opens and closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentShift {
    /// Dedent tokens to emit, before the indent.
    pub dedents: usize,
    /// Whether to emit one indent token.
    pub indent: bool,
}

impl IndentShift {
    pub fn is_empty(&self) -> bool {
        self.dedents == 0 && !self.indent
    }
}

/// Stack of open indentation widths.
#[derive(Debug, Clone)]
pub struct IndentStack {
    widths: Vec<usize>,
}

impl Default for IndentStack {
    fn default() -> Self {
        Self { widths: vec![0] }
    }
}

impl IndentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of the innermost open block.
    #[inline]
    pub fn current(&self) -> usize {
        self.widths.last().copied().unwrap_or(0)
    }

    /// Open blocks above the sentinel.
    #[inline]
    pub fn depth(&self) -> usize {
        self.widths.len() - 1
    }

    /// Feed the width of a significant line.
    pub fn line(&mut self, width: usize) -> IndentShift {
        let mut shift = IndentShift::default();

        if width > self.current() {
            self.widths.push(width);
            shift.indent = true;
            return shift;
        }

        while self.current() > width {
            self.widths.pop();
            shift.dedents += 1;
        }

        // Under-indentation that lands between two open levels opens a new one.
        if self.current() != width {
            self.widths.push(width);
            shift.indent = true;
        }

        shift
    }

    /// Close every open block, returning how many dedents to emit.
    pub fn finish(&mut self) -> usize {
        let open = self.depth();
        self.widths.truncate(1);
        open
    }
}

/// Indentation width of a line and the bytes it spans.
///
/// A tab counts for `tab_width` columns, a space for one.
pub fn measure(line: &str, tab_width: usize) -> (usize, usize) {
    let mut width = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => width += 1,
            b'\t' => width += tab_width,
            _ => break,
        }
        bytes += 1;
    }
    (width, bytes)
}
