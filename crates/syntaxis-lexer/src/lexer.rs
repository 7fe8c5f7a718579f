//! Lexing pass.
//!
//! The lexer walks the buffer once. At each position it skips whitespace,
//! comments and escaped newlines, records newlines, then tries every
//! top-level token whose matcher accepts the current character. The longest
//! match wins, earlier declarations win ties, and the winner is refined to
//! the deepest child token matching the whole lexeme.
//!
//! With indent and dedent roles declared, the width of every non-blank line
//! feeds an `IndentStack` and the resulting zero-length tokens are emitted
//! before the line's first token.

use syntaxis_core::{TokenId, TokenRole, TokenTable};

use crate::error::{LexerError, Result};
use crate::indent::{IndentStack, measure};
use crate::pattern::{PatternMatcher, TokenMatcher};
use crate::result::{LexerResult, LexerToken};
use crate::trace::{NoopTracer, Tracer};

/// Lexer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerOptions {
    /// Columns counted for a tab in indentation.
    pub tab_width: usize,
    /// Whether `\` right before a newline joins the two lines.
    pub escape_newlines: bool,
    /// Pattern of comments, skipped like whitespace.
    pub comments: Option<String>,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            tab_width: 4,
            escape_newlines: false,
            comments: None,
        }
    }
}

/// Builder for `Lexer`.
#[must_use = "lexer not built, call .build()"]
pub struct LexerBuilder<'a> {
    tokens: &'a TokenTable,
    options: LexerOptions,
}

impl<'a> LexerBuilder<'a> {
    pub fn new(tokens: &'a TokenTable) -> Self {
        Self {
            tokens,
            options: LexerOptions::default(),
        }
    }

    pub fn tab_width(mut self, width: usize) -> Self {
        self.options.tab_width = width;
        self
    }

    pub fn escape_newlines(mut self, yes: bool) -> Self {
        self.options.escape_newlines = yes;
        self
    }

    pub fn comments(mut self, pattern: impl Into<String>) -> Self {
        self.options.comments = Some(pattern.into());
        self
    }

    pub fn options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<Lexer> {
        Lexer::new(self.tokens, self.options)
    }
}

/// Compiled tokenizer for one token table.
#[derive(Debug, Clone)]
pub struct Lexer {
    /// Indexed by token id.
    matchers: Vec<Option<TokenMatcher>>,
    /// Parentless tokens with a recognizer, in declaration order.
    top_level: Vec<TokenId>,
    /// Direct children, indexed by parent id.
    children: Vec<Vec<TokenId>>,
    end: TokenId,
    error: TokenId,
    end_of_line: Option<TokenId>,
    /// Indent and dedent tokens, when both are declared.
    indentation: Option<(TokenId, TokenId)>,
    comments: Option<PatternMatcher>,
    options: LexerOptions,
}

impl Lexer {
    pub fn builder(tokens: &TokenTable) -> LexerBuilder<'_> {
        LexerBuilder::new(tokens)
    }

    pub fn new(tokens: &TokenTable, options: LexerOptions) -> Result<Self> {
        let end = tokens
            .role(TokenRole::End)
            .ok_or(LexerError::MissingRole(TokenRole::End))?;
        let error = tokens
            .role(TokenRole::Error)
            .ok_or(LexerError::MissingRole(TokenRole::Error))?;
        if options.tab_width == 0 {
            return Err(LexerError::ZeroTabWidth);
        }

        let matchers = tokens
            .iter()
            .map(|(_, decl)| TokenMatcher::compile(decl))
            .collect::<Result<Vec<_>>>()?;

        let top_level = tokens
            .top_level()
            .map(|(id, _)| id)
            .filter(|&id| matchers[id as usize].is_some())
            .collect();

        let mut children = vec![Vec::new(); tokens.len()];
        for (id, decl) in tokens.iter() {
            if let Some(parent) = decl.parent {
                children[parent.id as usize].push(id);
            }
        }

        let indentation = match (tokens.role(TokenRole::Indent), tokens.role(TokenRole::Dedent)) {
            (Some(indent), Some(dedent)) => Some((indent, dedent)),
            _ => None,
        };

        let comments = options
            .comments
            .as_deref()
            .map(|pattern| {
                PatternMatcher::new(pattern, true, None).map_err(|message| {
                    LexerError::CommentPattern {
                        pattern: pattern.to_owned(),
                        message,
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            matchers,
            top_level,
            children,
            end,
            error,
            end_of_line: tokens.role(TokenRole::EndOfLine),
            indentation,
            comments,
            options,
        })
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// Compiled recognizer of a token, if it has one.
    pub fn matcher(&self, token: TokenId) -> Option<&TokenMatcher> {
        self.matchers.get(token as usize)?.as_ref()
    }

    pub fn lex(&self, buffer: impl Into<String>) -> LexerResult {
        self.lex_with(buffer, &mut NoopTracer)
    }

    pub fn lex_with<T: Tracer>(&self, buffer: impl Into<String>, tracer: &mut T) -> LexerResult {
        let buffer = buffer.into();
        let (tokens, newlines, invalid) = Scan::new(self, &buffer, tracer).run();
        LexerResult::new(buffer, tokens, newlines, invalid)
    }

    /// Deepest descendant of `token` matching the whole lexeme.
    fn refine(&self, token: TokenId, lexeme: &str) -> TokenId {
        for &child in &self.children[token as usize] {
            if let Some(matcher) = &self.matchers[child as usize]
                && matcher.match_len(lexeme, 0) == lexeme.len()
            {
                return self.refine(child, lexeme);
            }
        }
        token
    }
}

/// State of one lexing pass.
struct Scan<'a, T: Tracer> {
    lexer: &'a Lexer,
    buffer: &'a str,
    tracer: &'a mut T,
    pos: usize,
    tokens: Vec<LexerToken>,
    newlines: Vec<usize>,
    invalid: bool,
    /// Start of the pending run of unrecognized input.
    error_start: Option<usize>,
    indent: IndentStack,
}

impl<'a, T: Tracer> Scan<'a, T> {
    fn new(lexer: &'a Lexer, buffer: &'a str, tracer: &'a mut T) -> Self {
        Self {
            lexer,
            buffer,
            tracer,
            pos: 0,
            tokens: Vec::new(),
            newlines: Vec::new(),
            invalid: false,
            error_start: None,
            indent: IndentStack::new(),
        }
    }

    fn run(mut self) -> (Vec<LexerToken>, Vec<usize>, bool) {
        let mut at_line_start = true;
        loop {
            if at_line_start {
                at_line_start = false;
                self.line_start();
            }

            let Some(c) = self.buffer[self.pos..].chars().next() else {
                break;
            };

            match c {
                ' ' | '\t' => {
                    self.flush_error();
                    self.pos += 1;
                }
                '\n' => {
                    self.flush_error();
                    self.newline(1);
                    at_line_start = true;
                }
                '\r' if self.buffer[self.pos..].starts_with("\r\n") => {
                    self.flush_error();
                    self.newline(2);
                    at_line_start = true;
                }
                '\r' => {
                    self.flush_error();
                    self.pos += 1;
                }
                _ => {
                    if let Some(len) = self.comment_at(self.pos) {
                        self.flush_error();
                        self.record_inner_newlines(self.pos, self.pos + len);
                        self.pos += len;
                    } else if c == '\\'
                        && self.lexer.options.escape_newlines
                        && let Some(next) = self.escaped_newline()
                    {
                        self.flush_error();
                        self.pos = next;
                    } else {
                        self.token(c);
                    }
                }
            }
        }

        self.flush_error();
        self.finish();
        (self.tokens, self.newlines, self.invalid)
    }

    /// Feed the indentation of a new line, unless it is blank.
    fn line_start(&mut self) {
        let Some((indent, dedent)) = self.lexer.indentation else {
            return;
        };

        let (width, spaces) = measure(&self.buffer[self.pos..], self.lexer.options.tab_width);
        let mut probe = self.pos + spaces;
        if let Some(len) = self.comment_at(probe) {
            probe += len;
        }
        let rest = &self.buffer[probe..];
        if rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n") {
            return;
        }

        self.pos += spaces;
        let at = self.pos;
        let shift = self.indent.line(width);
        for _ in 0..shift.dedents {
            self.tokens.push(LexerToken::new(dedent, at, 0));
            self.tracer.trace_dedent(at);
        }
        if shift.indent {
            self.tokens.push(LexerToken::new(indent, at, 0));
            self.tracer.trace_indent(at, width);
        }
    }

    /// Consume a line terminator of `len` bytes at the current position.
    fn newline(&mut self, len: usize) {
        let start = self.pos;
        let offset = start + len - 1;
        self.newlines.push(offset);
        self.tracer.trace_newline(offset, false);

        if let Some(eol) = self.wants_end_of_line() {
            self.tokens.push(LexerToken::new(eol, start, len));
            self.tracer.trace_token(eol, start, len);
        }
        self.pos = start + len;
    }

    /// End-of-line token to emit, if any: not first, not after another one.
    fn wants_end_of_line(&self) -> Option<TokenId> {
        let eol = self.lexer.end_of_line?;
        let last = self.tokens.last()?;
        (last.token != eol).then_some(eol)
    }

    /// Position after `\`, an optional comment and a newline, if that is what follows.
    fn escaped_newline(&mut self) -> Option<usize> {
        let mut at = self.pos + 1;
        if let Some(len) = self.comment_at(at) {
            at += len;
        }
        let rest = &self.buffer[at..];
        let newline = if rest.starts_with("\r\n") {
            at + 1
        } else if rest.starts_with('\n') {
            at
        } else {
            return None;
        };

        self.newlines.push(newline);
        self.tracer.trace_newline(newline, true);
        Some(newline + 1)
    }

    fn comment_at(&self, offset: usize) -> Option<usize> {
        let comments = self.lexer.comments.as_ref()?;
        let len = comments.match_len(self.buffer, offset);
        (len > 0).then_some(len)
    }

    /// Newlines swallowed by a multi-line token or comment.
    fn record_inner_newlines(&mut self, start: usize, end: usize) {
        let found = self.buffer[start..end]
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'\n')
            .map(|(i, _)| start + i);
        self.newlines.extend(found);
    }

    fn token(&mut self, c: char) {
        let lexer = self.lexer;
        let mut best: Option<TokenId> = None;
        let mut best_len = 0;
        for &id in &lexer.top_level {
            let Some(matcher) = &lexer.matchers[id as usize] else {
                continue;
            };
            if matcher.max_len() <= best_len || !matcher.starts_with(c) {
                continue;
            }
            let len = matcher.match_len(self.buffer, self.pos);
            if len > best_len {
                best = Some(id);
                best_len = len;
            }
        }

        let Some(id) = best else {
            self.error_start.get_or_insert(self.pos);
            self.pos += c.len_utf8();
            return;
        };

        self.flush_error();
        let start = self.pos;
        let end = start + best_len;
        let id = lexer.refine(id, &self.buffer[start..end]);
        self.tokens.push(LexerToken::new(id, start, best_len));
        self.tracer.trace_token(id, start, best_len);
        self.record_inner_newlines(start, end);
        self.pos = end;
    }

    fn flush_error(&mut self) {
        let Some(start) = self.error_start.take() else {
            return;
        };
        let len = self.pos - start;
        self.tokens.push(LexerToken::new(self.lexer.error, start, len));
        self.invalid = true;
        self.tracer.trace_error(start, len);
    }

    fn finish(&mut self) {
        let end = self.buffer.len();

        if let Some(eol) = self.wants_end_of_line() {
            self.tokens.push(LexerToken::new(eol, end, 0));
            self.tracer.trace_token(eol, end, 0);
        }

        if let Some((_, dedent)) = self.lexer.indentation {
            for _ in 0..self.indent.finish() {
                self.tokens.push(LexerToken::new(dedent, end, 0));
                self.tracer.trace_dedent(end);
            }
        }

        self.tokens.push(LexerToken::new(self.lexer.end, end, 0));
        self.tracer.trace_token(self.lexer.end, end, 0);
    }
}
