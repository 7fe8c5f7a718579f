//! Ranked type indexing and rule id allocation.

use syntaxis_core::{RankIndex, RankedType, RuleId};

use crate::declare::GrammarDecl;
use crate::error::{CompileError, Result};
use crate::trace::CompileTracer;

/// One variant of a declared rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Allocation {
    /// Index of the declaration.
    pub decl: usize,
    /// Bit `j` set keeps the `j`-th optional parameter.
    pub variant: u32,
}

/// Assign ranked type ids and one rule id per declaration variant.
///
/// Allocation `i` gets rule id `first_rule + i`. Variants of a declaration
/// are consecutive.
pub(super) fn allocate<T: CompileTracer>(
    decl: &GrammarDecl,
    first_rule: RuleId,
    max_optionals: usize,
    tracer: &mut T,
) -> Result<(RankIndex, Vec<Allocation>)> {
    let mut ranks = RankIndex::new();
    let mut allocations = Vec::new();

    for (index, rule) in decl.rules().iter().enumerate() {
        let ranked = RankedType::new(rule.produces, rule.rank);
        let known = ranks.id(ranked).is_some();
        let type_id = ranks.register(ranked);
        if !known {
            tracer.trace_ranked_type(ranked, type_id);
        }

        let count = rule.optional_count();
        let variants = (count <= max_optionals)
            .then(|| 1u32.checked_shl(count as u32))
            .flatten()
            .ok_or_else(|| CompileError::TooManyOptionals {
                rule: rule.action.clone(),
                count,
                max: max_optionals,
            })?;

        for variant in 0..variants {
            let id = first_rule + allocations.len() as RuleId;
            allocations.push(Allocation {
                decl: index,
                variant,
            });
            ranks.push_rule(type_id, id);
        }
    }

    Ok((ranks, allocations))
}
