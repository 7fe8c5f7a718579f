//! Tracing infrastructure for debugging lexing.
//!
//! `NoopTracer` methods are `#[inline(always)]` empty functions, so
//! `Lexer::lex` pays nothing for instrumentation. `PrintTracer` collects one
//! line per event for display.

use syntaxis_core::{TokenId, TokenTable};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Tokens, indentation and errors. Names only, no text.
    #[default]
    Default,
    /// Also shows token text.
    Verbose,
    /// Also shows newlines and indentation widths.
    VeryVerbose,
}

/// Lexer instrumentation.
///
/// Methods receive raw ids and offsets; naming happens in the tracer.
pub trait Tracer {
    /// Called for every emitted token except indent, dedent and error tokens.
    fn trace_token(&mut self, token: TokenId, start: usize, len: usize);

    /// Called when a line opens a block.
    fn trace_indent(&mut self, offset: usize, width: usize);

    /// Called for each closed block.
    fn trace_dedent(&mut self, offset: usize);

    /// Called for each run of unrecognized input.
    fn trace_error(&mut self, start: usize, len: usize);

    /// Called for every newline, escaped or not.
    fn trace_newline(&mut self, offset: usize, escaped: bool);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_token(&mut self, _token: TokenId, _start: usize, _len: usize) {}

    #[inline(always)]
    fn trace_indent(&mut self, _offset: usize, _width: usize) {}

    #[inline(always)]
    fn trace_dedent(&mut self, _offset: usize) {}

    #[inline(always)]
    fn trace_error(&mut self, _start: usize, _len: usize) {}

    #[inline(always)]
    fn trace_newline(&mut self, _offset: usize, _escaped: bool) {}
}

/// Tracer collecting human-readable lines.
pub struct PrintTracer<'s> {
    source: &'s str,
    names: Vec<String>,
    verbosity: Verbosity,
    lines: Vec<String>,
}

impl<'s> PrintTracer<'s> {
    pub fn new(source: &'s str, tokens: &TokenTable, verbosity: Verbosity) -> Self {
        Self {
            source,
            names: tokens.names(),
            verbosity,
            lines: Vec::new(),
        }
    }

    fn name(&self, token: TokenId) -> &str {
        self.names.get(token as usize).map_or("?", |s| s.as_str())
    }

    fn text(&self, start: usize, len: usize) -> &str {
        self.source.get(start..start + len).unwrap_or("")
    }

    fn push(&mut self, offset: usize, body: String) {
        self.lines.push(format!("{offset:<5} {body}"));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines, newline-terminated.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Print the trace to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_token(&mut self, token: TokenId, start: usize, len: usize) {
        let name = self.name(token).to_owned();
        let body = if self.verbosity == Verbosity::Default || len == 0 {
            name
        } else {
            format!("{name} {:?}", self.text(start, len))
        };
        self.push(start, body);
    }

    fn trace_indent(&mut self, offset: usize, width: usize) {
        let body = if self.verbosity == Verbosity::VeryVerbose {
            format!("indent {width}")
        } else {
            "indent".to_owned()
        };
        self.push(offset, body);
    }

    fn trace_dedent(&mut self, offset: usize) {
        self.push(offset, "dedent".to_owned());
    }

    fn trace_error(&mut self, start: usize, len: usize) {
        let body = format!("error {:?}", self.text(start, len));
        self.push(start, body);
    }

    fn trace_newline(&mut self, offset: usize, escaped: bool) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let body = if escaped { "newline (escaped)" } else { "newline" };
        self.push(offset, body.to_owned());
    }
}
