//! Compiled grammar.
//!
//! A `Grammar` is the output of the grammar compiler and the input of a
//! parsing engine: the token table, every rule with its steps, the starting
//! and ending token sets of each rule, and the rules a parse begins with.
//!
//! Entity ids are shared between tokens and rules. Tokens occupy
//! `0..token_count`, rules follow in allocation order.

mod binary;
mod describe;
mod rank;
mod types;


use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::kinds::{KindTable, NodeKind};
use crate::tokens::{TokenId, TokenTable};

pub use binary::GrammarError;
pub use rank::RankIndex;
pub use types::{RankedType, RankedTypeId, Rule, RuleId, RuleOrigin, RuleStep};

/// Everything a `Grammar` is assembled from.
#[derive(Debug, Clone)]
pub struct GrammarParts {
    pub tokens: TokenTable,
    pub kinds: KindTable,
    pub start: NodeKind,
    pub end_of_stream: TokenId,
    pub ranks: RankIndex,
    pub rules: Vec<Rule>,
    pub public_children: IndexMap<TokenId, Vec<TokenId>>,
    pub initial: Vec<RuleId>,
}

/// Immutable compiled grammar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grammar {
    tokens: TokenTable,
    kinds: KindTable,
    start: NodeKind,
    end_of_stream: TokenId,
    ranks: RankIndex,
    rules: Vec<Rule>,
    public_children: IndexMap<TokenId, Vec<TokenId>>,
    initial: Vec<RuleId>,
}

impl Grammar {
    /// # Panics
    /// Panics if rule ids are not dense and do not start right after the
    /// last token.
    pub fn from_parts(parts: GrammarParts) -> Self {
        let grammar = Self {
            tokens: parts.tokens,
            kinds: parts.kinds,
            start: parts.start,
            end_of_stream: parts.end_of_stream,
            ranks: parts.ranks,
            rules: parts.rules,
            public_children: parts.public_children,
            initial: parts.initial,
        };
        grammar.ensure_dense_rule_ids();
        grammar
    }

    #[inline]
    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    #[inline]
    pub fn kinds(&self) -> &KindTable {
        &self.kinds
    }

    /// Display names of the tokens, indexed by token id.
    pub fn token_names(&self) -> Vec<String> {
        self.tokens.names()
    }

    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Tokens plus rules.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.tokens.len() + self.rules.len()
    }

    #[inline]
    pub fn is_token(&self, id: u32) -> bool {
        (id as usize) < self.tokens.len()
    }

    #[inline]
    pub fn is_rule(&self, id: u32) -> bool {
        !self.is_token(id) && (id as usize) < self.entity_count()
    }

    #[inline]
    pub fn end_of_stream(&self) -> TokenId {
        self.end_of_stream
    }

    /// The kind a parse produces.
    #[inline]
    pub fn start(&self) -> NodeKind {
        self.start
    }

    /// Look up a rule by id.
    ///
    /// # Panics
    /// Panics if `id` is not a rule of this grammar.
    pub fn rule(&self, id: RuleId) -> &Rule {
        self.ensure_rule(id)
    }

    pub fn try_rule(&self, id: RuleId) -> Option<&Rule> {
        let index = (id as usize).checked_sub(self.tokens.len())?;
        self.rules.get(index)
    }

    /// All rules, in id order.
    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rank_index(&self) -> &RankIndex {
        &self.ranks
    }

    pub fn ranked_type_id(&self, ranked: RankedType) -> Option<RankedTypeId> {
        self.ranks.id(ranked)
    }

    pub fn ranked_type(&self, id: RankedTypeId) -> Option<RankedType> {
        self.ranks.ranked_type(id)
    }

    /// Declared rules producing exactly this ranked type.
    pub fn rule_ids(&self, ranked: RankedType) -> &[RuleId] {
        self.ranks.rule_ids(ranked)
    }

    pub fn max_rank(&self, kind: NodeKind) -> Option<u32> {
        self.ranks.max_rank(kind)
    }

    /// Declared rules producing `kind` at ranks up to `max_rank` (default: all).
    pub fn rules_of_kind(&self, kind: NodeKind, max_rank: Option<u32>) -> Vec<RuleId> {
        self.ranks.rules_of_kind(kind, max_rank).unwrap_or_default()
    }

    /// Rules a parse of the start kind begins with.
    #[inline]
    pub fn initial_rules(&self) -> &[RuleId] {
        &self.initial
    }

    /// Public children of each token that has some.
    #[inline]
    pub fn public_children(&self) -> &IndexMap<TokenId, Vec<TokenId>> {
        &self.public_children
    }

    /// Name of a step source: upper-cased token name or rule label.
    pub(crate) fn entity_label(&self, id: u32) -> String {
        if self.is_token(id) {
            return self.tokens.name(id).to_uppercase();
        }
        let rule = self.rule(id);
        match rule.action() {
            Some(action) => action.to_owned(),
            None => format!("{}*", self.kinds.resolve(rule.kind())),
        }
    }
}
