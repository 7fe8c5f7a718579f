//! List desugaring into synthetic rules.
//!
//! A list of `E` with delimiter `D` becomes a loop pair:
//!
//! ```text
//! END  := E [D if terminator]
//! LOOP := E [D] (END | LOOP)
//! ```
//!
//! The parameter then points at `END | LOOP` (min 0 or 1), `LOOP` (min 2)
//! or an init rule repeating `E [D]` `min - 1` times before `END | LOOP`.
//! Loop pairs are shared by every list with the same element, rank cap and
//! delimiter; init rules are not.

use std::collections::HashMap;

use syntaxis_core::{NodeKind, RankedType, Rule, RuleId, RuleOrigin, RuleStep, TokenId};

use crate::declare::ListDelimiter;
use crate::trace::CompileTracer;

/// Identity of a loop pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct LoopKey {
    pub element: NodeKind,
    pub max_rank: Option<u32>,
    pub delimiter: Option<ListDelimiter>,
}

/// A list parameter, resolved.
pub(super) struct ListShape<'a> {
    pub key: LoopKey,
    /// Element kind at the applied rank cap.
    pub ranked: RankedType,
    /// Rules an element can be.
    pub items: &'a [RuleId],
    /// Delimiter token and its public descendants.
    pub delimiter: Option<&'a [TokenId]>,
    pub min: u32,
}

impl ListShape<'_> {
    fn is_terminated(&self) -> bool {
        matches!(self.key.delimiter, Some(ListDelimiter::Terminator(_)))
    }

    /// `E` or `E D`.
    fn element_steps(&self) -> Vec<RuleStep> {
        let mut steps = vec![RuleStep::non_terminal(self.items.to_vec())];
        if let Some(delimiter) = self.delimiter {
            steps.push(RuleStep::terminal(delimiter.to_vec()));
        }
        steps
    }
}

/// Synthetic rules, numbered from `next` in creation order.
pub(super) struct ListRules {
    next: RuleId,
    rules: Vec<Rule>,
    loops: HashMap<LoopKey, (RuleId, RuleId)>,
}

impl ListRules {
    pub fn new(first: RuleId) -> Self {
        Self {
            next: first,
            rules: Vec::new(),
            loops: HashMap::new(),
        }
    }

    /// The step a list parameter compiles to.
    pub fn step<T: CompileTracer>(&mut self, list: &ListShape<'_>, tracer: &mut T) -> RuleStep {
        let (end, repeat) = self.loop_pair(list, tracer);
        match list.min {
            0 | 1 => RuleStep::non_terminal(vec![end, repeat]),
            2 => RuleStep::non_terminal(vec![repeat]),
            _ => {
                let init = self.init(list, end, repeat);
                RuleStep::non_terminal(vec![init])
            }
        }
    }

    fn loop_pair<T: CompileTracer>(&mut self, list: &ListShape<'_>, tracer: &mut T) -> (RuleId, RuleId) {
        if let Some(&pair) = self.loops.get(&list.key) {
            return pair;
        }

        let end = self.next;
        let repeat = end + 1;
        self.next += 2;
        self.loops.insert(list.key, (end, repeat));
        tracer.trace_loop(list.ranked, end, repeat);

        let mut end_steps = vec![RuleStep::non_terminal(list.items.to_vec())];
        if let (true, Some(delimiter)) = (list.is_terminated(), list.delimiter) {
            end_steps.push(RuleStep::terminal(delimiter.to_vec()));
        }
        self.push(end, list.ranked, RuleOrigin::ListEnd, end_steps);

        let mut loop_steps = list.element_steps();
        loop_steps.push(RuleStep::non_terminal(vec![end, repeat]));
        self.push(repeat, list.ranked, RuleOrigin::ListLoop, loop_steps);

        (end, repeat)
    }

    fn init(&mut self, list: &ListShape<'_>, end: RuleId, repeat: RuleId) -> RuleId {
        let id = self.next;
        self.next += 1;

        let mut steps = Vec::new();
        for _ in 1..list.min {
            steps.extend(list.element_steps());
        }
        steps.push(RuleStep::non_terminal(vec![end, repeat]));
        self.push(id, list.ranked, RuleOrigin::ListInit, steps);
        id
    }

    fn push(&mut self, id: RuleId, ranked: RankedType, origin: RuleOrigin, steps: Vec<RuleStep>) {
        self.rules.push(Rule::new(id, ranked, origin, steps, Vec::new()));
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }
}
