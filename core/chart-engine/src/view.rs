//! FILENAME: core/chart-engine/src/view.rs
//! Chart View - Output models for the charting backend.
//!
//! Every model is rebuilt from scratch on each render. Fields that come from
//! a role-bound cell are `Option`: a row that lacked the cell produces an
//! explicit `None` rather than failing the whole chart.

use serde::{Deserialize, Serialize};

use crate::label::FormattedLabel;

// ============================================================================
// GRAPH
// ============================================================================

/// A graph vertex. Created on the first sighting of its dedup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Dedup key when nodes are identified by member id. Links then refer
    /// to this instead of `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: Option<String>,

    /// Category of the row that introduced this node (first write wins).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A directed arc. One per input row, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: Option<String>,
    pub target: Option<String>,
    pub value: Option<f64>,
}

/// A legend entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<Edge>,
    /// Deduplicated, sorted ascending by name.
    pub categories: Vec<Category>,
}

impl GraphModel {
    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.name.as_deref() == Some(name))
    }
}

// ============================================================================
// SANKEY
// ============================================================================

/// A sankey node after prior-period reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: Option<String>,

    /// Flow through the node: the larger of its inbound and outbound totals.
    pub value: f64,

    /// Prior-period value: the larger of what the node accumulated as a
    /// child and what it accumulated as a parent.
    pub prior: f64,

    pub label: FormattedLabel,
}

/// A sankey link. One per contributing row, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: Option<String>,
    pub target: Option<String>,
    pub value: Option<f64>,

    /// The row's prior-period value (0 without a comparison measure).
    pub prior: f64,

    /// Absent when the row carried no current value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<FormattedLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyModel {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

impl SankeyModel {
    pub fn node(&self, name: &str) -> Option<&SankeyNode> {
        self.nodes.iter().find(|n| n.name.as_deref() == Some(name))
    }
}

// ============================================================================
// GAUGE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeModel {
    /// First row's first measure, rounded to 2 places. `None` without rows.
    pub value: Option<f64>,
    pub min: f64,
    pub max: f64,
}

// ============================================================================
// CHART MODEL
// ============================================================================

/// The model handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartModel {
    Graph(GraphModel),
    Sankey(SankeyModel),
    Gauge(GaugeModel),
}
