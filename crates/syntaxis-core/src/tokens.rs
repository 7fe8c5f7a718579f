//! Token declarations.
//!
//! A `TokenTable` is the token enumeration of a language: display names,
//! recognizers, the parent/child hierarchy and the special roles
//! (end-of-stream, error, indent, dedent, end-of-line).
//!
//! Token ids are dense and start at zero. A compiled grammar numbers its
//! rules right after the last token, so the table length is also the id of
//! the first rule.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Token identifier. Also the lower part of the grammar entity id space.
pub type TokenId = u32;

/// How a token is recognized in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recognizer {
    /// One of a finite set of literal strings. The longest one wins.
    Literals(Vec<String>),
    /// A regular expression anchored at the current position.
    Pattern {
        pattern: String,
        /// Characters a match can start with. `None` accepts any character.
        start: Option<String>,
    },
    /// The token's own display name, case-insensitive.
    Name,
}

/// Whether a child token can stand in for its parent in terminal steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Substitutable: a terminal expecting the parent also accepts the child.
    Public,
    /// Not substitutable: e.g. `if` is lexed from an identifier but is not one.
    Private,
}

/// Parent link of a child token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParent {
    pub id: TokenId,
    pub visibility: Visibility,
}

/// Special roles a token can play for the lexer and the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenRole {
    End,
    Error,
    Indent,
    Dedent,
    EndOfLine,
}

impl std::fmt::Display for TokenRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenRole::End => write!(f, "end-of-stream"),
            TokenRole::Error => write!(f, "error"),
            TokenRole::Indent => write!(f, "indent"),
            TokenRole::Dedent => write!(f, "dedent"),
            TokenRole::EndOfLine => write!(f, "end-of-line"),
        }
    }
}

/// One declared token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDecl {
    pub name: String,
    pub recognizer: Option<Recognizer>,
    pub case_sensitive: bool,
    pub parent: Option<TokenParent>,
    pub role: Option<TokenRole>,
}

impl TokenDecl {
    fn new(name: String) -> Self {
        Self {
            name,
            recognizer: None,
            case_sensitive: true,
            parent: None,
            role: None,
        }
    }

    /// The recognizer with the `Name` shorthand expanded into a literal set.
    pub fn effective_recognizer(&self) -> Option<Cow<'_, Recognizer>> {
        match &self.recognizer {
            Some(Recognizer::Name) => Some(Cow::Owned(Recognizer::Literals(vec![
                self.name.clone(),
            ]))),
            Some(r) => Some(Cow::Borrowed(r)),
            None => None,
        }
    }

    /// Case sensitivity after applying the `Name` shorthand.
    pub fn is_case_sensitive(&self) -> bool {
        !matches!(self.recognizer, Some(Recognizer::Name)) && self.case_sensitive
    }
}

/// Errors detected while building a token table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenTableError {
    #[error("token `{token}` declares unknown parent #{parent}")]
    UnknownParent { token: String, parent: TokenId },

    #[error("token `{token}` is its own ancestor")]
    CyclicParent { token: String },

    #[error("{role} role is assigned to both `{first}` and `{second}`")]
    DuplicateRole {
        role: TokenRole,
        first: String,
        second: String,
    },

    #[error("token `{token}` plays the {role} role and cannot have a recognizer")]
    RoleWithRecognizer { token: String, role: TokenRole },

    #[error("token `{token}` declares no literal")]
    EmptyLiterals { token: String },

    #[error("token `{token}` declares an empty literal")]
    EmptyLiteral { token: String },
}

/// Token ids of the special roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRoles {
    pub end: Option<TokenId>,
    pub error: Option<TokenId>,
    pub indent: Option<TokenId>,
    pub dedent: Option<TokenId>,
    pub end_of_line: Option<TokenId>,
}

impl TokenRoles {
    pub fn get(&self, role: TokenRole) -> Option<TokenId> {
        match role {
            TokenRole::End => self.end,
            TokenRole::Error => self.error,
            TokenRole::Indent => self.indent,
            TokenRole::Dedent => self.dedent,
            TokenRole::EndOfLine => self.end_of_line,
        }
    }

    fn slot(&mut self, role: TokenRole) -> &mut Option<TokenId> {
        match role {
            TokenRole::End => &mut self.end,
            TokenRole::Error => &mut self.error,
            TokenRole::Indent => &mut self.indent,
            TokenRole::Dedent => &mut self.dedent,
            TokenRole::EndOfLine => &mut self.end_of_line,
        }
    }
}

/// Validated token enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTable {
    tokens: Vec<TokenDecl>,
    roles: TokenRoles,
}

impl TokenTable {
    pub fn builder() -> TokenTableBuilder {
        TokenTableBuilder::new()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, id: TokenId) -> Option<&TokenDecl> {
        self.tokens.get(id as usize)
    }

    #[inline]
    pub fn contains(&self, id: TokenId) -> bool {
        (id as usize) < self.tokens.len()
    }

    /// Display name of a token.
    ///
    /// # Panics
    /// Panics if the id is not a token of this table.
    pub fn name(&self, id: TokenId) -> &str {
        &self.tokens[id as usize].name
    }

    /// All display names, indexed by token id.
    pub fn names(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &TokenDecl)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (i as TokenId, t))
    }

    pub fn roles(&self) -> TokenRoles {
        self.roles
    }

    pub fn role(&self, role: TokenRole) -> Option<TokenId> {
        self.roles.get(role)
    }

    /// Direct children of a token, in declaration order.
    pub fn children(&self, parent: TokenId) -> impl Iterator<Item = (TokenId, Visibility)> + '_ {
        self.iter().filter_map(move |(id, decl)| match decl.parent {
            Some(p) if p.id == parent => Some((id, p.visibility)),
            _ => None,
        })
    }

    /// Tokens without a parent, in declaration order.
    pub fn top_level(&self) -> impl Iterator<Item = (TokenId, &TokenDecl)> {
        self.iter().filter(|(_, decl)| decl.parent.is_none())
    }

    /// Public children of every token that has at least one.
    ///
    /// Keys and values are in declaration order.
    pub fn public_children(&self) -> IndexMap<TokenId, Vec<TokenId>> {
        let mut map: IndexMap<TokenId, Vec<TokenId>> = IndexMap::new();
        for (id, decl) in self.iter() {
            if let Some(parent) = decl.parent
                && parent.visibility == Visibility::Public
            {
                map.entry(parent.id).or_default().push(id);
            }
        }
        map.sort_keys();
        map
    }
}

/// Incremental declaration of a `TokenTable`.
///
/// Ids are handed out in declaration order, starting at zero.
#[derive(Debug, Clone, Default)]
pub struct TokenTableBuilder {
    tokens: Vec<TokenDecl>,
}

impl TokenTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring a token. Call `.add()` on the result.
    pub fn token(&mut self, name: impl Into<String>) -> TokenDeclBuilder<'_> {
        TokenDeclBuilder {
            builder: self,
            decl: TokenDecl::new(name.into()),
        }
    }

    /// Id the next declared token will receive.
    pub fn next_id(&self) -> TokenId {
        self.tokens.len() as TokenId
    }

    /// Validate the declarations.
    pub fn build(self) -> Result<TokenTable, TokenTableError> {
        let mut roles = TokenRoles::default();

        for (index, decl) in self.tokens.iter().enumerate() {
            if let Some(parent) = decl.parent
                && parent.id as usize >= self.tokens.len()
            {
                return Err(TokenTableError::UnknownParent {
                    token: decl.name.clone(),
                    parent: parent.id,
                });
            }

            match &decl.recognizer {
                Some(Recognizer::Literals(options)) if options.is_empty() => {
                    return Err(TokenTableError::EmptyLiterals {
                        token: decl.name.clone(),
                    });
                }
                Some(Recognizer::Literals(options)) if options.iter().any(String::is_empty) => {
                    return Err(TokenTableError::EmptyLiteral {
                        token: decl.name.clone(),
                    });
                }
                _ => {}
            }

            let Some(role) = decl.role else {
                continue;
            };

            if decl.recognizer.is_some() {
                return Err(TokenTableError::RoleWithRecognizer {
                    token: decl.name.clone(),
                    role,
                });
            }

            let slot = roles.slot(role);
            if let Some(first) = *slot {
                return Err(TokenTableError::DuplicateRole {
                    role,
                    first: self.tokens[first as usize].name.clone(),
                    second: decl.name.clone(),
                });
            }
            *slot = Some(index as TokenId);
        }

        // A parent chain longer than the table means a cycle.
        for decl in &self.tokens {
            let mut current = decl.parent;
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if steps > self.tokens.len() {
                    return Err(TokenTableError::CyclicParent {
                        token: decl.name.clone(),
                    });
                }
                current = self.tokens[parent.id as usize].parent;
            }
        }

        Ok(TokenTable {
            tokens: self.tokens,
            roles,
        })
    }
}

/// Builder for a single token declaration.
#[must_use = "token not declared, call .add()"]
pub struct TokenDeclBuilder<'a> {
    builder: &'a mut TokenTableBuilder,
    decl: TokenDecl,
}

impl<'a> TokenDeclBuilder<'a> {
    /// Recognize exactly this string.
    pub fn literal(self, literal: impl Into<String>) -> Self {
        self.literals([literal])
    }

    /// Recognize any of these strings, preferring the longest.
    pub fn literals<S: Into<String>>(mut self, literals: impl IntoIterator<Item = S>) -> Self {
        self.decl.recognizer = Some(Recognizer::Literals(
            literals.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Recognize a regular expression.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.decl.recognizer = Some(Recognizer::Pattern {
            pattern: pattern.into(),
            start: None,
        });
        self
    }

    /// Restrict the characters a pattern match can start with.
    ///
    /// Has no effect on literal recognizers, which compute their own set.
    pub fn starting_with(mut self, chars: impl Into<String>) -> Self {
        if let Some(Recognizer::Pattern { start, .. }) = &mut self.decl.recognizer {
            *start = Some(chars.into());
        }
        self
    }

    /// Recognize the token's own name, case-insensitively.
    pub fn by_name(mut self) -> Self {
        self.decl.recognizer = Some(Recognizer::Name);
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.decl.case_sensitive = false;
        self
    }

    /// Public child: lexed from `parent`'s lexeme and accepted wherever `parent` is.
    pub fn child_of(mut self, parent: TokenId) -> Self {
        self.decl.parent = Some(TokenParent {
            id: parent,
            visibility: Visibility::Public,
        });
        self
    }

    /// Private child: lexed from `parent`'s lexeme but never accepted in its place.
    pub fn private_child_of(mut self, parent: TokenId) -> Self {
        self.decl.parent = Some(TokenParent {
            id: parent,
            visibility: Visibility::Private,
        });
        self
    }

    pub fn role(mut self, role: TokenRole) -> Self {
        self.decl.role = Some(role);
        self
    }

    /// Declare the token and return its id.
    pub fn add(self) -> TokenId {
        let id = self.builder.tokens.len() as TokenId;
        self.builder.tokens.push(self.decl);
        id
    }
}
