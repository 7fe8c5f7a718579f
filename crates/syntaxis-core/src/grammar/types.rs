//! Grammar entity types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::kinds::NodeKind;
use crate::tokens::TokenId;

/// Rule identifier. Rules are numbered right after the last token.
pub type RuleId = u32;

/// Dense identifier of a `RankedType`, in first-seen order.
pub type RankedTypeId = u32;

/// A produced kind at a priority level.
///
/// Rules of the same kind at different ranks are alternative rule sets,
/// e.g. operator precedence levels. Consumers can ask for all rules of a
/// kind up to a given rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RankedType {
    pub kind: NodeKind,
    pub rank: u32,
}

impl RankedType {
    pub fn new(kind: NodeKind, rank: u32) -> Self {
        Self { kind, rank }
    }
}

/// One element of a rule's right-hand side.
///
/// `sources` holds token ids for terminal steps and rule ids otherwise.
/// It is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleStep {
    sources: Vec<u32>,
    terminal: bool,
}

impl RuleStep {
    /// # Panics
    /// Panics if `sources` is empty.
    pub fn terminal(sources: Vec<TokenId>) -> Self {
        assert!(!sources.is_empty(), "RuleStep: empty terminal alternatives");
        Self {
            sources,
            terminal: true,
        }
    }

    /// # Panics
    /// Panics if `sources` is empty.
    pub fn non_terminal(sources: Vec<RuleId>) -> Self {
        assert!(
            !sources.is_empty(),
            "RuleStep: empty non-terminal alternatives"
        );
        Self {
            sources,
            terminal: false,
        }
    }

    #[inline]
    pub fn sources(&self) -> &[u32] {
        &self.sources
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// Where a rule comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOrigin {
    /// A declared rule, reduced by the named action.
    Declared {
        action: String,
        /// Index of the declaration in its grammar declaration.
        decl: u32,
    },
    /// `ELEMENT [TERMINATOR]`: the last element of a list.
    ListEnd,
    /// `ELEMENT [DELIMITER] LIST`: one more element, then the rest.
    ListLoop,
    /// Mandatory leading elements of a list with a minimum length above two.
    ListInit,
}

impl RuleOrigin {
    pub fn action(&self) -> Option<&str> {
        match self {
            RuleOrigin::Declared { action, .. } => Some(action),
            _ => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        !matches!(self, RuleOrigin::Declared { .. })
    }
}

/// A compiled rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub(crate) id: RuleId,
    pub(crate) ranked: RankedType,
    pub(crate) origin: RuleOrigin,
    pub(crate) steps: Vec<RuleStep>,
    pub(crate) args: Vec<bool>,
    pub(crate) starting: BTreeSet<TokenId>,
    pub(crate) ending: BTreeSet<TokenId>,
}

impl Rule {
    pub fn new(
        id: RuleId,
        ranked: RankedType,
        origin: RuleOrigin,
        steps: Vec<RuleStep>,
        args: Vec<bool>,
    ) -> Self {
        Self {
            id,
            ranked,
            origin,
            steps,
            args,
            starting: BTreeSet::new(),
            ending: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// The produced kind and rank. Synthetic list rules produce the element kind.
    #[inline]
    pub fn ranked(&self) -> RankedType {
        self.ranked
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.ranked.kind
    }

    #[inline]
    pub fn origin(&self) -> &RuleOrigin {
        &self.origin
    }

    /// Action reducing this rule, absent for synthetic list rules.
    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.origin.action()
    }

    #[inline]
    pub fn steps(&self) -> &[RuleStep] {
        &self.steps
    }

    /// Presence of each declared parameter in this variant.
    ///
    /// Empty for synthetic rules.
    #[inline]
    pub fn args(&self) -> &[bool] {
        &self.args
    }

    /// Tokens that can begin a match of this rule.
    #[inline]
    pub fn starting_tokens(&self) -> &BTreeSet<TokenId> {
        &self.starting
    }

    /// Tokens that can follow a reduction of this rule, end-of-stream included.
    #[inline]
    pub fn ending_tokens(&self) -> &BTreeSet<TokenId> {
        &self.ending
    }

    /// Whether the first step can be a reduction of `rule`.
    pub fn starts_with_rule(&self, rule: RuleId) -> bool {
        self.steps
            .first()
            .is_some_and(|s| !s.is_terminal() && s.sources().contains(&rule))
    }

    /// Fill the starting set. Used by the grammar compiler only.
    pub fn set_starting_tokens(&mut self, tokens: BTreeSet<TokenId>) {
        self.starting = tokens;
    }

    /// Fill the ending set. Used by the grammar compiler only.
    pub fn set_ending_tokens(&mut self, tokens: BTreeSet<TokenId>) {
        self.ending = tokens;
    }
}
