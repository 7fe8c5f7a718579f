//! Ranked type index.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{RankedType, RankedTypeId, RuleId};
use crate::kinds::NodeKind;

/// Declared rules, grouped by produced `RankedType`.
///
/// Ranked types get dense ids in first-seen order. Synthetic list rules are
/// not registered here: they are only reachable through the steps that use them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankIndex {
    max_rank: IndexMap<NodeKind, u32>,
    rules: IndexMap<RankedType, Vec<RuleId>>,
}

impl RankIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the id of a ranked type, raising the kind's max rank if needed.
    pub fn register(&mut self, ranked: RankedType) -> RankedTypeId {
        let max = self.max_rank.entry(ranked.kind).or_insert(ranked.rank);
        if *max < ranked.rank {
            *max = ranked.rank;
        }

        let entry = self.rules.entry(ranked);
        let id = entry.index() as RankedTypeId;
        entry.or_default();
        id
    }

    /// Bind a rule to a registered ranked type.
    ///
    /// # Panics
    /// Panics if `id` was not returned by `register`.
    pub fn push_rule(&mut self, id: RankedTypeId, rule: RuleId) {
        let (_, rules) = self
            .rules
            .get_index_mut(id as usize)
            .unwrap_or_else(|| panic!("RankIndex: ranked type #{id} not registered"));
        rules.push(rule);
    }

    pub fn id(&self, ranked: RankedType) -> Option<RankedTypeId> {
        self.rules.get_index_of(&ranked).map(|i| i as RankedTypeId)
    }

    pub fn ranked_type(&self, id: RankedTypeId) -> Option<RankedType> {
        self.rules.get_index(id as usize).map(|(ranked, _)| *ranked)
    }

    /// Rules declared for exactly this ranked type.
    pub fn rule_ids(&self, ranked: RankedType) -> &[RuleId] {
        self.rules.get(&ranked).map_or(&[], Vec::as_slice)
    }

    /// Highest declared rank of a kind, `None` if no rule produces it.
    pub fn max_rank(&self, kind: NodeKind) -> Option<u32> {
        self.max_rank.get(&kind).copied()
    }

    /// Rules producing `kind` at ranks `0..=cap`, lowest rank first.
    ///
    /// The cap never goes past the kind's max rank. Returns `None` for a kind
    /// no rule produces; the result can be empty when the cap is below every
    /// declared rank.
    pub fn rules_of_kind(&self, kind: NodeKind, cap: Option<u32>) -> Option<Vec<RuleId>> {
        let max = self.max_rank(kind)?;
        let cap = cap.map_or(max, |c| c.min(max));

        let mut out = Vec::new();
        for rank in 0..=cap {
            out.extend_from_slice(self.rule_ids(RankedType::new(kind, rank)));
        }
        Some(out)
    }

    /// Ranked types with their rules, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (RankedType, &[RuleId])> {
        self.rules.iter().map(|(r, ids)| (*r, ids.as_slice()))
    }

    /// Kinds with at least one rule, in first-seen order.
    pub fn kinds(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.max_rank.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
