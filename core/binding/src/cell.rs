//! FILENAME: core/binding/src/cell.rs
//! PURPOSE: One (row, field) intersection of the result set, and the row itself.
//! CONTEXT: Dimension cells carry a display label, a stable id and, for
//! hierarchies, the id of their parent member. Measure cells carry `raw`.
//! Every field is optional so that an absent value is an explicit branch
//! instead of a silently propagated hole.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A single cell as delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Display name of the member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Stable member identity. Two members may share a label but not an id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Id of the parent member (hierarchical dimensions only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Numeric value (measure cells only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<f64>,
}

impl Cell {
    /// A dimension member cell.
    pub fn member(label: impl Into<String>, id: impl Into<String>) -> Self {
        Cell {
            label: Some(label.into()),
            id: Some(id.into()),
            parent_id: None,
            raw: None,
        }
    }

    /// A dimension member cell that hangs below `parent_id`.
    pub fn child_member(
        label: impl Into<String>,
        id: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> Self {
        Cell {
            parent_id: Some(parent_id.into()),
            ..Cell::member(label, id)
        }
    }

    /// A measure cell.
    pub fn measure(raw: f64) -> Self {
        Cell {
            raw: Some(raw),
            ..Cell::default()
        }
    }
}

/// One result-set record: field key -> cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: FxHashMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Row {
            cells: FxHashMap::default(),
        }
    }

    /// Builder-style insert, handy for assembling rows in code.
    pub fn with(mut self, key: impl Into<String>, cell: Cell) -> Self {
        self.insert(key, cell);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, cell: Cell) {
        self.cells.insert(key.into(), cell);
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.get(key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
