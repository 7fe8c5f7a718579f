//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::grammar::{Grammar, Rule, RuleId};

impl Grammar {
    pub(crate) fn ensure_rule(&self, id: RuleId) -> &Rule {
        self.try_rule(id).unwrap_or_else(|| {
            panic!(
                "Grammar: rule id {id} out of range ({} tokens, {} rules)",
                self.token_count(),
                self.rules().len()
            )
        })
    }

    pub(crate) fn ensure_dense_rule_ids(&self) {
        let first = self.token_count() as RuleId;
        for (index, rule) in self.rules().iter().enumerate() {
            let expected = first + index as RuleId;
            assert_eq!(
                rule.id(),
                expected,
                "Grammar: rule at index {index} must have id {expected}"
            );
        }
    }
}
