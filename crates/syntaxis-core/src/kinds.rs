//! Node kind interning.
//!
//! Every production in a grammar is keyed by the kind of node it produces.
//! Kinds are declared by name and converted into cheap integer handles
//! (`NodeKind`); comparing two kinds is an O(1) integer comparison.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A lightweight handle to a declared node kind.
///
/// Kinds are ordered by declaration order, not lexicographically.
/// Use `KindTable::resolve` to get the name back.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct NodeKind(u32);

impl NodeKind {
    /// Raw index for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a NodeKind from a raw index. Use only for deserialization.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind name table. Deduplicates names and hands out `NodeKind` handles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KindTable {
    /// Map from name to kind for deduplication.
    #[serde(skip)]
    map: HashMap<String, NodeKind>,
    /// Kind names, indexed by NodeKind.
    names: Vec<String>,
}

impl KindTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a kind, returning its handle.
    /// Declaring the same name twice returns the existing handle.
    pub fn intern(&mut self, name: &str) -> NodeKind {
        if let Some(&kind) = self.map.get(name) {
            return kind;
        }

        let kind = NodeKind(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.map.insert(name.to_owned(), kind);
        kind
    }

    /// Look up a kind by name without declaring it.
    pub fn get(&self, name: &str) -> Option<NodeKind> {
        self.map.get(name).copied()
    }

    /// Resolve a kind back to its name.
    ///
    /// # Panics
    /// Panics if the kind was not created by this table.
    #[inline]
    pub fn resolve(&self, kind: NodeKind) -> &str {
        &self.names[kind.index()]
    }

    /// Try to resolve a kind, returning None if it belongs to another table.
    #[inline]
    pub fn try_resolve(&self, kind: NodeKind) -> Option<&str> {
        self.names.get(kind.index()).map(|s| s.as_str())
    }

    #[inline]
    pub fn contains(&self, kind: NodeKind) -> bool {
        kind.index() < self.names.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over all kinds with their names, in declaration order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, s)| (NodeKind(i as u32), s.as_str()))
    }

    /// Rebuild the lookup map after deserialization.
    pub(crate) fn reindex(&mut self) {
        self.map = self
            .names
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), NodeKind(i as u32)))
            .collect();
    }
}
