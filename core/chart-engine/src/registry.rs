//! FILENAME: core/chart-engine/src/registry.rs
// PURPOSE: First-sighting node registry shared by the graph and flow builders.
// CONTEXT: A node is created the first time its dedup key is seen; later
//          sightings get the existing record back. Insertion order is kept.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

pub(crate) struct FirstSighting<'r, N> {
    index: FxHashMap<Option<&'r str>, usize>,
    nodes: Vec<N>,
}

impl<'r, N> FirstSighting<'r, N> {
    pub fn new() -> Self {
        FirstSighting {
            index: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Returns the node for `key` and whether this sighting created it.
    /// An absent key is a key of its own: all keyless members share one node.
    pub fn sight(&mut self, key: Option<&'r str>, make: impl FnOnce() -> N) -> (&mut N, bool) {
        let next = self.nodes.len();
        match self.index.entry(key) {
            Entry::Occupied(entry) => (&mut self.nodes[*entry.get()], false),
            Entry::Vacant(entry) => {
                entry.insert(next);
                self.nodes.push(make());
                (&mut self.nodes[next], true)
            }
        }
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}
