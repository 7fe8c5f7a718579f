//! Lowering of declared rule variants into rules.

use indexmap::IndexMap;
use syntaxis_core::{
    KindTable, NodeKind, RankIndex, RankedType, Rule, RuleId, RuleOrigin, RuleStep, TokenId,
    TokenTable,
};

use super::expand::expand_tokens;
use super::lists::{ListRules, ListShape, LoopKey};
use super::types::Allocation;
use crate::declare::{GrammarDecl, Param, ParamShape, RuleDecl};
use crate::error::{CompileError, Result};
use crate::trace::CompileTracer;

/// Read-only context shared by all variants.
pub(super) struct Lowering<'a> {
    pub tokens: &'a TokenTable,
    pub decl: &'a GrammarDecl,
    pub ranks: &'a RankIndex,
    pub public_children: &'a IndexMap<TokenId, Vec<TokenId>>,
}

impl Lowering<'_> {
    fn kinds(&self) -> &KindTable {
        self.decl.kinds()
    }

    /// Build the rule for one variant, creating list rules on the way.
    pub fn rule<T: CompileTracer>(
        &self,
        id: RuleId,
        allocation: Allocation,
        lists: &mut ListRules,
        tracer: &mut T,
    ) -> Result<Rule> {
        let rule = &self.decl.rules()[allocation.decl];
        let mut variant = allocation.variant;
        let mut steps = Vec::with_capacity(rule.params.len());
        let mut args = Vec::with_capacity(rule.params.len());

        for param in &rule.params {
            let present = if param.shape.is_optional() {
                let keep = variant & 1 == 1;
                variant >>= 1;
                keep
            } else {
                true
            };
            args.push(present);
            if present {
                steps.push(self.step(rule, param, lists, tracer)?);
            }
        }

        Ok(Rule::new(
            id,
            RankedType::new(rule.produces, rule.rank),
            RuleOrigin::Declared {
                action: rule.action.clone(),
                decl: allocation.decl as u32,
            },
            steps,
            args,
        ))
    }

    fn step<T: CompileTracer>(
        &self,
        rule: &RuleDecl,
        param: &Param,
        lists: &mut ListRules,
        tracer: &mut T,
    ) -> Result<RuleStep> {
        match &param.shape {
            ParamShape::Terminal { tokens, .. } => {
                Ok(RuleStep::terminal(self.terminal(rule, param, tokens)?))
            }
            ParamShape::NonTerminal { kind, max_rank, .. } => Ok(RuleStep::non_terminal(
                self.alternatives(rule, param, *kind, *max_rank)?,
            )),
            ParamShape::List {
                element,
                max_rank,
                min,
                delimiter,
            } => {
                let items = self.alternatives(rule, param, *element, *max_rank)?;
                let delimiter_tokens = delimiter
                    .map(|d| self.terminal(rule, param, &[d.token()]))
                    .transpose()?;
                let top = self.ranks.max_rank(*element).unwrap_or_default();
                let rank = max_rank.map_or(top, |cap| cap.min(top));
                let shape = ListShape {
                    key: LoopKey {
                        element: *element,
                        max_rank: *max_rank,
                        delimiter: *delimiter,
                    },
                    ranked: RankedType::new(*element, rank),
                    items: &items,
                    delimiter: delimiter_tokens.as_deref(),
                    min: *min,
                };
                Ok(lists.step(&shape, tracer))
            }
        }
    }

    /// Expanded, validated token alternatives.
    fn terminal(&self, rule: &RuleDecl, param: &Param, tokens: &[TokenId]) -> Result<Vec<TokenId>> {
        if tokens.is_empty() {
            return Err(CompileError::EmptyTerminal {
                rule: rule.action.clone(),
                param: param.name.clone(),
            });
        }
        if let Some(&token) = tokens.iter().find(|&&t| !self.tokens.contains(t)) {
            return Err(CompileError::UnknownToken {
                rule: rule.action.clone(),
                param: param.name.clone(),
                token,
            });
        }
        Ok(expand_tokens(tokens, self.public_children))
    }

    /// Rules producing `kind` up to `max_rank`.
    fn alternatives(
        &self,
        rule: &RuleDecl,
        param: &Param,
        kind: NodeKind,
        max_rank: Option<u32>,
    ) -> Result<Vec<RuleId>> {
        let kind_name = || self.kinds().try_resolve(kind).unwrap_or("?").to_owned();
        let rules = self
            .ranks
            .rules_of_kind(kind, max_rank)
            .ok_or_else(|| CompileError::UnknownKind {
                rule: rule.action.clone(),
                param: param.name.clone(),
                kind: kind_name(),
            })?;
        if rules.is_empty() {
            return Err(CompileError::EmptyAlternatives {
                rule: rule.action.clone(),
                param: param.name.clone(),
                kind: kind_name(),
                max_rank: max_rank.unwrap_or_default(),
            });
        }
        Ok(rules)
    }
}
