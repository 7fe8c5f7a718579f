//! Grammar declarations.
//!
//! A grammar is declared as an ordered list of rules. Each rule names the
//! action that reduces it, the node kind it produces at some rank, and its
//! parameters in order. Parameters are terminals (tokens), non-terminals
//! (other kinds) or lists of a kind.
//!
//! ```text
//! let mut g = GrammarBuilder::new();
//! g.rule("Sum", "Expr")
//!     .non_terminal("left", "Expr")
//!     .terminal("op", [plus, minus])
//!     .non_terminal_up_to("right", "Expr", 0)
//!     .add();
//! ```

use syntaxis_core::{KindTable, NodeKind, TokenId};

/// What closes each list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListDelimiter {
    /// Between elements: `a, b, c`.
    Separator(TokenId),
    /// After every element: `a; b; c;`.
    Terminator(TokenId),
}

impl ListDelimiter {
    pub fn token(self) -> TokenId {
        match self {
            ListDelimiter::Separator(t) | ListDelimiter::Terminator(t) => t,
        }
    }
}

/// Shape of one rule parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamShape {
    /// One of the given tokens (or their public descendants).
    Terminal { tokens: Vec<TokenId>, optional: bool },
    /// A node of `kind`, from rules of rank at most `max_rank` (default: any rank).
    NonTerminal {
        kind: NodeKind,
        max_rank: Option<u32>,
        optional: bool,
    },
    /// At least `min` nodes of `element`. A list with `min == 0` is optional.
    List {
        element: NodeKind,
        max_rank: Option<u32>,
        min: u32,
        delimiter: Option<ListDelimiter>,
    },
}

impl ParamShape {
    /// Whether the parameter can be left out, producing one more rule variant.
    pub fn is_optional(&self) -> bool {
        match self {
            ParamShape::Terminal { optional, .. } | ParamShape::NonTerminal { optional, .. } => {
                *optional
            }
            ParamShape::List { min, .. } => *min == 0,
        }
    }
}

/// A named rule parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub shape: ParamShape,
}

/// One declared rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDecl {
    /// Name of the action reducing the rule.
    pub action: String,
    pub produces: NodeKind,
    pub rank: u32,
    pub params: Vec<Param>,
}

impl RuleDecl {
    pub fn optional_count(&self) -> usize {
        self.params.iter().filter(|p| p.shape.is_optional()).count()
    }
}

/// A complete grammar declaration: kind names and rules, in order.
#[derive(Debug, Clone, Default)]
pub struct GrammarDecl {
    kinds: KindTable,
    rules: Vec<RuleDecl>,
}

impl GrammarDecl {
    pub fn kinds(&self) -> &KindTable {
        &self.kinds
    }

    pub fn rules(&self) -> &[RuleDecl] {
        &self.rules
    }
}

/// Incremental declaration of a `GrammarDecl`.
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    kinds: KindTable,
    rules: Vec<RuleDecl>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of a kind, declaring it on first use.
    pub fn kind(&mut self, name: &str) -> NodeKind {
        self.kinds.intern(name)
    }

    /// Start declaring a rule reduced by `action` and producing `produces`.
    pub fn rule(&mut self, action: impl Into<String>, produces: &str) -> RuleDeclBuilder<'_> {
        let produces = self.kinds.intern(produces);
        RuleDeclBuilder {
            decl: RuleDecl {
                action: action.into(),
                produces,
                rank: 0,
                params: Vec::new(),
            },
            builder: self,
        }
    }

    pub fn build(self) -> GrammarDecl {
        GrammarDecl {
            kinds: self.kinds,
            rules: self.rules,
        }
    }
}

/// Builder for a single rule declaration.
#[must_use = "rule not declared, call .add()"]
pub struct RuleDeclBuilder<'a> {
    builder: &'a mut GrammarBuilder,
    decl: RuleDecl,
}

impl RuleDeclBuilder<'_> {
    pub fn rank(mut self, rank: u32) -> Self {
        self.decl.rank = rank;
        self
    }

    pub fn param(mut self, name: impl Into<String>, shape: ParamShape) -> Self {
        self.decl.params.push(Param {
            name: name.into(),
            shape,
        });
        self
    }

    pub fn terminal(self, name: impl Into<String>, tokens: impl IntoIterator<Item = TokenId>) -> Self {
        let tokens = tokens.into_iter().collect();
        self.param(
            name,
            ParamShape::Terminal {
                tokens,
                optional: false,
            },
        )
    }

    pub fn optional_terminal(
        self,
        name: impl Into<String>,
        tokens: impl IntoIterator<Item = TokenId>,
    ) -> Self {
        let tokens = tokens.into_iter().collect();
        self.param(
            name,
            ParamShape::Terminal {
                tokens,
                optional: true,
            },
        )
    }

    pub fn non_terminal(self, name: impl Into<String>, kind: &str) -> Self {
        self.non_terminal_shape(name, kind, None, false)
    }

    pub fn optional_non_terminal(self, name: impl Into<String>, kind: &str) -> Self {
        self.non_terminal_shape(name, kind, None, true)
    }

    /// Non-terminal restricted to rules of rank `max_rank` or lower.
    pub fn non_terminal_up_to(self, name: impl Into<String>, kind: &str, max_rank: u32) -> Self {
        self.non_terminal_shape(name, kind, Some(max_rank), false)
    }

    pub fn optional_non_terminal_up_to(
        self,
        name: impl Into<String>,
        kind: &str,
        max_rank: u32,
    ) -> Self {
        self.non_terminal_shape(name, kind, Some(max_rank), true)
    }

    fn non_terminal_shape(
        mut self,
        name: impl Into<String>,
        kind: &str,
        max_rank: Option<u32>,
        optional: bool,
    ) -> Self {
        let kind = self.builder.kinds.intern(kind);
        self.decl.params.push(Param {
            name: name.into(),
            shape: ParamShape::NonTerminal {
                kind,
                max_rank,
                optional,
            },
        });
        self
    }

    /// List of at least `min` elements of `element`.
    pub fn list(
        self,
        name: impl Into<String>,
        element: &str,
        min: u32,
        delimiter: Option<ListDelimiter>,
    ) -> Self {
        self.list_shape(name, element, None, min, delimiter)
    }

    /// List whose elements are rules of rank `max_rank` or lower.
    pub fn list_up_to(
        self,
        name: impl Into<String>,
        element: &str,
        max_rank: u32,
        min: u32,
        delimiter: Option<ListDelimiter>,
    ) -> Self {
        self.list_shape(name, element, Some(max_rank), min, delimiter)
    }

    fn list_shape(
        mut self,
        name: impl Into<String>,
        element: &str,
        max_rank: Option<u32>,
        min: u32,
        delimiter: Option<ListDelimiter>,
    ) -> Self {
        let element = self.builder.kinds.intern(element);
        self.decl.params.push(Param {
            name: name.into(),
            shape: ParamShape::List {
                element,
                max_rank,
                min,
                delimiter,
            },
        });
        self
    }

    /// Declare the rule and return its declaration index.
    pub fn add(self) -> usize {
        let index = self.builder.rules.len();
        self.builder.rules.push(self.decl);
        index
    }
}
