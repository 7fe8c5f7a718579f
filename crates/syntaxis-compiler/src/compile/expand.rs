//! Token hierarchy expansion.

use std::collections::HashSet;

use indexmap::IndexMap;
use syntaxis_core::TokenId;

/// The tokens plus all their public descendants, without duplicates.
///
/// Depth-first, each token followed by its descendants in declaration
/// order. Private children never appear: they are absent from
/// `public_children`.
pub fn expand_tokens(
    tokens: &[TokenId],
    public_children: &IndexMap<TokenId, Vec<TokenId>>,
) -> Vec<TokenId> {
    let leaf_only = !tokens.iter().any(|t| public_children.contains_key(t));
    let distinct = tokens
        .iter()
        .enumerate()
        .all(|(i, t)| !tokens[..i].contains(t));
    if leaf_only && distinct {
        return tokens.to_vec();
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut stack: Vec<TokenId> = tokens.iter().rev().copied().collect();

    while let Some(token) = stack.pop() {
        if !seen.insert(token) {
            continue;
        }
        out.push(token);
        if let Some(children) = public_children.get(&token) {
            stack.extend(children.iter().rev());
        }
    }

    out
}
