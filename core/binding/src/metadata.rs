//! FILENAME: core/binding/src/metadata.rs
//! PURPOSE: Dimension and measure descriptors, and their normalization.
//! CONTEXT: The host describes dimensions and measures ("main structure
//! members") as mappings keyed by an opaque id. Chart builders address them
//! positionally (first dimension = edge source, and so on), so the mappings
//! are flattened into ordered lists that keep declaration order and record
//! each entry's original key.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Describes one column role (a dimension or a measure) of the result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// The mapping key this descriptor was declared under. Rows are keyed by it.
    #[serde(default)]
    pub key: String,

    /// Human-readable column name.
    #[serde(default)]
    pub label: String,

    /// Any further host attributes, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Descriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Descriptor {
            key: key.into(),
            label: label.into(),
            extra: Map::new(),
        }
    }
}

/// Metadata as it arrives: mapping-keyed, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub dimensions: IndexMap<String, Descriptor>,

    /// Measures. The host calls them main structure members.
    #[serde(default)]
    pub main_structure_members: IndexMap<String, Descriptor>,
}

impl Metadata {
    pub fn normalize(&self) -> NormalizedMetadata {
        normalize_metadata(self)
    }
}

/// Metadata flattened into positional lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetadata {
    pub dimensions: Vec<Descriptor>,
    pub measures: Vec<Descriptor>,
}

impl NormalizedMetadata {
    pub fn dimension(&self, position: usize) -> Option<&Descriptor> {
        self.dimensions.get(position)
    }

    pub fn measure(&self, position: usize) -> Option<&Descriptor> {
        self.measures.get(position)
    }
}

/// Flattens both mappings into ordered descriptor lists.
///
/// Output order is mapping iteration (declaration) order and every entry's
/// `key` is overwritten with the key it was declared under, even when the
/// descriptor body carries a `key` attribute of its own. No validation is
/// performed: an empty mapping gives an empty list.
pub fn normalize_metadata(metadata: &Metadata) -> NormalizedMetadata {
    NormalizedMetadata {
        dimensions: flatten(&metadata.dimensions),
        measures: flatten(&metadata.main_structure_members),
    }
}

fn flatten(mapping: &IndexMap<String, Descriptor>) -> Vec<Descriptor> {
    mapping
        .iter()
        .map(|(key, descriptor)| Descriptor {
            key: key.clone(),
            ..descriptor.clone()
        })
        .collect()
}
