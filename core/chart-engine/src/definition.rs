//! FILENAME: core/chart-engine/src/definition.rs
//! Chart Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a chart binding.
//! These structures are designed to be:
//! - Loadable from the widget's JSON configuration
//! - Immutable snapshots of how dimensions and measures map to chart roles

use binding::{IdentityPolicy, IdentityResolver, MissingFieldPolicy};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

// ============================================================================
// CHART KIND
// ============================================================================

/// Which chart model a binding is turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Node/link graph: source, target and optional category dimensions.
    Graph,
    /// Sankey over a parent/child dimension pair with optional prior period.
    Sankey,
    /// Sankey over a single parent-child hierarchy dimension.
    Hierarchy,
    /// Single-value gauge.
    Gauge,
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Graph => "graph",
            ChartKind::Sankey => "sankey",
            ChartKind::Hierarchy => "hierarchy",
            ChartKind::Gauge => "gauge",
        }
    }
}

// ============================================================================
// GRAPH OPTIONS
// ============================================================================

/// Positional meaning of the first two dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleOrder {
    /// `[source, target, ...]`
    SourceTarget,
    /// `[target, source, ...]`
    TargetSource,
}

impl Default for RoleOrder {
    fn default() -> Self {
        RoleOrder::SourceTarget
    }
}

/// How category dimensions after the edge roles are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryMode {
    /// Third dimension categorizes both ends of an edge.
    Shared,
    /// Third dimension is the source category, fourth the target category.
    Split,
}

impl Default for CategoryMode {
    fn default() -> Self {
        CategoryMode::Shared
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOptions {
    #[serde(default)]
    pub role_order: RoleOrder,

    #[serde(default)]
    pub categories: CategoryMode,
}

// ============================================================================
// GAUGE OPTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeOptions {
    #[serde(default = "default_gauge_min")]
    pub min: f64,

    #[serde(default = "default_gauge_max")]
    pub max: f64,
}

fn default_gauge_min() -> f64 {
    0.0
}

fn default_gauge_max() -> f64 {
    3000.0
}

impl Default for GaugeOptions {
    fn default() -> Self {
        GaugeOptions {
            min: default_gauge_min(),
            max: default_gauge_max(),
        }
    }
}

// ============================================================================
// CHART DEFINITION
// ============================================================================

/// Complete configuration of one chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefinition {
    pub kind: ChartKind,

    /// Node dedup key.
    #[serde(default)]
    pub identity: IdentityPolicy,

    /// Handling of rows that lack a role-bound cell.
    #[serde(default)]
    pub missing_fields: MissingFieldPolicy,

    #[serde(default)]
    pub graph: GraphOptions,

    #[serde(default)]
    pub gauge: GaugeOptions,
}

impl ChartDefinition {
    pub fn new(kind: ChartKind) -> Self {
        ChartDefinition {
            kind,
            identity: IdentityPolicy::default(),
            missing_fields: MissingFieldPolicy::default(),
            graph: GraphOptions::default(),
            gauge: GaugeOptions::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_identity(mut self, identity: IdentityPolicy) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_missing_fields(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_fields = policy;
        self
    }

    pub fn with_graph(mut self, graph: GraphOptions) -> Self {
        self.graph = graph;
        self
    }

    pub fn resolver(&self) -> IdentityResolver {
        IdentityResolver::new(self.missing_fields, self.identity)
    }
}
