//! Starting token sets (FIRST).

use std::collections::BTreeSet;

use syntaxis_core::{Rule, RuleId};

use super::fixpoint::{propagate, slot, step_nullable};
use crate::trace::CompileTracer;

/// Fill every rule's starting tokens.
///
/// A rule starts with the tokens of its leading terminal, or with the
/// starting tokens of any alternative of its leading non-terminals, up to
/// and including the first step that cannot be empty.
pub(super) fn compute<T: CompileTracer>(
    rules: &mut [Rule],
    first_rule: RuleId,
    nullable: &[bool],
    tracer: &mut T,
) {
    let mut sets = vec![BTreeSet::new(); rules.len()];
    // edges[source] lists the rules whose starting set includes source's.
    let mut edges = vec![Vec::new(); rules.len()];

    for (index, rule) in rules.iter().enumerate() {
        for step in rule.steps() {
            if step.is_terminal() {
                sets[index].extend(step.sources().iter().copied());
                break;
            }
            for &source in step.sources() {
                edges[slot(first_rule, source)].push(index);
            }
            if !step_nullable(step, nullable, first_rule) {
                break;
            }
        }
    }

    let updates = propagate(&mut sets, &edges);
    tracer.trace_fixpoint("starting", updates);

    for (rule, set) in rules.iter_mut().zip(sets) {
        rule.set_starting_tokens(set);
    }
}
