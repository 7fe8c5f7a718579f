//! Ending token sets (FOLLOW, plus end-of-stream everywhere).

use std::collections::BTreeSet;

use syntaxis_core::{Rule, RuleId, RuleStep, TokenId};

use super::fixpoint::{propagate, slot, step_nullable};
use crate::trace::CompileTracer;

/// Fill every rule's ending tokens. Starting tokens must be known.
///
/// Every set contains `end_of_stream`. When rule `r` appears in step `i` of
/// rule `p`, `r` can end before whatever starts steps `i+1..`; if those
/// steps can all be empty, `r` can also end wherever `p` ends.
pub(super) fn compute<T: CompileTracer>(
    rules: &mut [Rule],
    first_rule: RuleId,
    end_of_stream: TokenId,
    nullable: &[bool],
    tracer: &mut T,
) {
    let mut sets = vec![BTreeSet::from([end_of_stream]); rules.len()];
    // edges[p] lists the rules whose ending set includes p's.
    let mut edges = vec![Vec::new(); rules.len()];

    for (index, rule) in rules.iter().enumerate() {
        let steps = rule.steps();
        for (at, step) in steps.iter().enumerate() {
            if step.is_terminal() {
                continue;
            }
            let (follow, open) = first_of(&steps[at + 1..], rules, first_rule, nullable);
            for &source in step.sources() {
                let target = slot(first_rule, source);
                sets[target].extend(follow.iter().copied());
                if open {
                    edges[index].push(target);
                }
            }
        }
    }

    let updates = propagate(&mut sets, &edges);
    tracer.trace_fixpoint("ending", updates);

    for (rule, set) in rules.iter_mut().zip(sets) {
        rule.set_ending_tokens(set);
    }
}

/// Tokens that can start `steps`, and whether `steps` can all be empty.
fn first_of(
    steps: &[RuleStep],
    rules: &[Rule],
    first_rule: RuleId,
    nullable: &[bool],
) -> (BTreeSet<TokenId>, bool) {
    let mut tokens = BTreeSet::new();
    for step in steps {
        if step.is_terminal() {
            tokens.extend(step.sources().iter().copied());
            return (tokens, false);
        }
        for &source in step.sources() {
            tokens.extend(rules[slot(first_rule, source)].starting_tokens().iter().copied());
        }
        if !step_nullable(step, nullable, first_rule) {
            return (tokens, false);
        }
    }
    (tokens, true)
}
