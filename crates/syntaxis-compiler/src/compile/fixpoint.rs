//! Shared fixed-point machinery for token set passes.
//!
//! Rules are addressed by index (`id - first_rule`). Both passes run a
//! worklist, so deep or cyclic grammars never recurse.

use std::collections::{BTreeSet, VecDeque};

use syntaxis_core::{Rule, RuleId, RuleStep, TokenId};

/// Index of a rule in the rule list.
#[inline]
pub(super) fn slot(first_rule: RuleId, id: RuleId) -> usize {
    (id - first_rule) as usize
}

/// Which rules can match empty input.
///
/// A variant with every parameter left out has no steps and is nullable.
/// So is any rule whose steps all have a nullable alternative.
pub(super) fn nullable(rules: &[Rule], first_rule: RuleId) -> Vec<bool> {
    let mut nullable = vec![false; rules.len()];
    loop {
        let mut changed = false;
        for (index, rule) in rules.iter().enumerate() {
            if nullable[index] {
                continue;
            }
            if rule
                .steps()
                .iter()
                .all(|step| step_nullable(step, &nullable, first_rule))
            {
                nullable[index] = true;
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

/// A non-terminal step with at least one nullable alternative.
pub(super) fn step_nullable(step: &RuleStep, nullable: &[bool], first_rule: RuleId) -> bool {
    !step.is_terminal()
        && step
            .sources()
            .iter()
            .any(|&s| nullable[slot(first_rule, s)])
}

/// Enforce `sets[to] ⊇ sets[from]` for every edge until nothing changes.
///
/// Returns the number of set updates performed.
pub(super) fn propagate(sets: &mut [BTreeSet<TokenId>], edges: &[Vec<usize>]) -> usize {
    let mut queue: VecDeque<usize> = (0..sets.len()).collect();
    let mut queued = vec![true; sets.len()];
    let mut updates = 0;

    while let Some(from) = queue.pop_front() {
        queued[from] = false;
        for &to in &edges[from] {
            if to == from {
                continue;
            }
            let added: Vec<TokenId> = sets[from].difference(&sets[to]).copied().collect();
            if added.is_empty() {
                continue;
            }
            sets[to].extend(added);
            updates += 1;
            if !queued[to] {
                queued[to] = true;
                queue.push_back(to);
            }
        }
    }

    updates
}
