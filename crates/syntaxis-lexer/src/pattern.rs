//! Token recognizers.
//!
//! A `TokenMatcher` answers three questions for the lexing loop:
//! can this token start with a given character (`starts_with`), how long
//! can a match possibly be (`max_len`), and how long is the actual anchored
//! match at an offset (`match_len`, 0 for no match).

use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};
use syntaxis_core::{Recognizer, TokenDecl};

use crate::error::{LexerError, Result};

/// Compiled recognizer of one token.
#[derive(Debug, Clone)]
pub enum TokenMatcher {
    Literals(LiteralSet),
    Pattern(PatternMatcher),
}

impl TokenMatcher {
    /// Compile the recognizer of a declared token, `None` if it has none.
    pub fn compile(decl: &TokenDecl) -> Result<Option<Self>> {
        let Some(recognizer) = decl.effective_recognizer() else {
            return Ok(None);
        };
        let case_sensitive = decl.is_case_sensitive();

        let matcher = match recognizer.as_ref() {
            Recognizer::Literals(literals) => {
                TokenMatcher::Literals(LiteralSet::new(literals, case_sensitive))
            }
            Recognizer::Pattern { pattern, start } => TokenMatcher::Pattern(
                PatternMatcher::new(pattern, case_sensitive, start.as_deref()).map_err(
                    |message| LexerError::Pattern {
                        token: decl.name.clone(),
                        pattern: pattern.clone(),
                        message,
                    },
                )?,
            ),
            Recognizer::Name => unreachable!("effective_recognizer expands Name"),
        };
        Ok(Some(matcher))
    }

    /// Upper bound of a match length in bytes.
    #[inline]
    pub fn max_len(&self) -> usize {
        match self {
            TokenMatcher::Literals(set) => set.max_len,
            TokenMatcher::Pattern(_) => usize::MAX,
        }
    }

    /// Fast filter on the first character of a match.
    #[inline]
    pub fn starts_with(&self, c: char) -> bool {
        match self {
            TokenMatcher::Literals(set) => set.first_chars.binary_search(&c).is_ok(),
            TokenMatcher::Pattern(p) => p.starts_with(c),
        }
    }

    /// Length of the longest match starting exactly at `offset`, or 0.
    pub fn match_len(&self, buffer: &str, offset: usize) -> usize {
        match self {
            TokenMatcher::Literals(set) => set.match_len(&buffer[offset..]),
            TokenMatcher::Pattern(p) => p.match_len(buffer, offset),
        }
    }

    /// Portable rendition for client-side highlighters.
    pub fn portable(&self) -> PortablePattern {
        match self {
            TokenMatcher::Literals(set) => {
                let escaped: Vec<_> = set.literals.iter().map(|l| regex_syntax::escape(l)).collect();
                let source = match escaped.as_slice() {
                    [single] => single.clone(),
                    _ => format!("(?:{})", escaped.join("|")),
                };
                PortablePattern::new(&source, set.case_sensitive)
            }
            TokenMatcher::Pattern(p) => PortablePattern::new(&p.pattern, p.case_sensitive),
        }
    }
}

/// A finite set of literals, longest first.
#[derive(Debug, Clone)]
pub struct LiteralSet {
    literals: Vec<String>,
    case_sensitive: bool,
    first_chars: Vec<char>,
    max_len: usize,
}

impl LiteralSet {
    /// # Panics
    /// Panics on an empty literal. `TokenTable` rejects those.
    pub fn new(literals: &[String], case_sensitive: bool) -> Self {
        let mut sorted = literals.to_vec();
        sorted.sort_by_key(|l| std::cmp::Reverse(l.len()));

        let mut first_chars = Vec::new();
        for literal in &sorted {
            let first = literal
                .chars()
                .next()
                .unwrap_or_else(|| panic!("LiteralSet: empty literal"));
            first_chars.push(first);
            first_chars.extend(first.to_lowercase());
            first_chars.extend(first.to_uppercase());
        }
        first_chars.sort_unstable();
        first_chars.dedup();

        // A folded character can take up to four bytes whatever its literal form.
        let max_len = sorted
            .iter()
            .map(|l| {
                if case_sensitive {
                    l.len()
                } else {
                    l.chars().count() * 4
                }
            })
            .max()
            .unwrap_or(0);

        Self {
            literals: sorted,
            case_sensitive,
            first_chars,
            max_len,
        }
    }

    /// Literals, longest first.
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    fn match_len(&self, rest: &str) -> usize {
        for literal in &self.literals {
            if self.case_sensitive {
                if rest.starts_with(literal.as_str()) {
                    return literal.len();
                }
            } else if let Some(len) = folded_prefix_len(rest, literal) {
                return len;
            }
        }
        0
    }
}

/// Bytes of `rest` matching `literal` under a per-character lowercase fold.
fn folded_prefix_len(rest: &str, literal: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    let mut consumed = 0;
    for expected in literal.chars() {
        let (at, actual) = chars.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed = at + actual.len_utf8();
    }
    Some(consumed)
}

/// A regular expression compiled to an anchored dense DFA.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    case_sensitive: bool,
    start: Option<Vec<char>>,
    dfa: dense::DFA<Vec<u32>>,
}

impl PatternMatcher {
    /// Compile a pattern. The error is the regex engine's message.
    pub fn new(
        pattern: &str,
        case_sensitive: bool,
        start: Option<&str>,
    ) -> std::result::Result<Self, String> {
        let dfa = dense::DFA::builder()
            .configure(
                dense::DFA::config()
                    .start_kind(StartKind::Anchored)
                    .unicode_word_boundary(true),
            )
            .syntax(syntax::Config::new().case_insensitive(!case_sensitive))
            .build(pattern)
            .map_err(|e| e.to_string())?;

        let start = start.map(|chars| {
            let mut chars: Vec<char> = chars.chars().collect();
            chars.sort_unstable();
            chars.dedup();
            chars
        });

        Ok(Self {
            pattern: pattern.to_owned(),
            case_sensitive,
            start,
            dfa,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[inline]
    pub fn starts_with(&self, c: char) -> bool {
        self.start
            .as_ref()
            .is_none_or(|chars| chars.binary_search(&c).is_ok())
    }

    /// Length of the leftmost-first match anchored at `offset`, or 0.
    ///
    /// A search the DFA gives up on (e.g. a Unicode word boundary next to
    /// non-ASCII text) counts as no match.
    pub fn match_len(&self, buffer: &str, offset: usize) -> usize {
        let input = Input::new(buffer).range(offset..).anchored(Anchored::Yes);
        match self.dfa.try_search_fwd(&input) {
            Ok(Some(m)) => m.offset() - offset,
            Ok(None) | Err(_) => 0,
        }
    }
}

/// A recognizer rendered as a JavaScript-style regex literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortablePattern {
    /// Pattern body with `/` escaped.
    pub source: String,
    /// `i` for case-insensitive tokens, empty otherwise.
    pub flags: String,
}

impl PortablePattern {
    fn new(pattern: &str, case_sensitive: bool) -> Self {
        Self {
            source: pattern.replace('/', "\\/"),
            flags: if case_sensitive { "" } else { "i" }.to_owned(),
        }
    }
}

impl std::fmt::Display for PortablePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/^{}/{}", self.source, self.flags)
    }
}
