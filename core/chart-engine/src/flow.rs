//! FILENAME: core/chart-engine/src/flow.rs
//! Flow Aggregator - rows -> sankey nodes with current and prior-period totals.
//!
//! Two inputs are supported:
//! - `build_sankey`: a `[parent, child]` dimension pair per row
//! - `build_hierarchy`: one dimension whose cells point at their parent by id
//!
//! Both share the same accumulation. Every node keeps two prior-period
//! accumulators, one for its appearances as a child and one for its
//! appearances as a parent (a name seen in both roles is one node). After
//! the last row the larger of the two becomes the node's prior value, which
//! is the denominator of its percentage-change label.

use binding::{Descriptor, IdentityPolicy, IdentityResolver, Member, NormalizedMetadata, Row};
use rustc_hash::FxHashMap;

use crate::definition::{ChartDefinition, ChartKind};
use crate::error::ChartError;
use crate::label::format_label;
use crate::logging::{log_debug, log_info};
use crate::registry::FirstSighting;
use crate::roles;
use crate::view::{SankeyLink, SankeyModel, SankeyNode};

const LOG_CATEGORY: &str = "FLOW";

// ============================================================================
// NODE ACCUMULATOR
// ============================================================================

/// Per-node running totals.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FlowAccumulator {
    id: Option<String>,
    name: Option<String>,
    /// Prior-period value accumulated while appearing as a child.
    prior_as_child: f64,
    /// Prior-period value accumulated while appearing as a parent.
    prior_as_parent: f64,
    inbound: f64,
    outbound: f64,
}

impl FlowAccumulator {
    fn new(identity: IdentityPolicy, member: &Member<'_>) -> Self {
        FlowAccumulator {
            id: match identity {
                IdentityPolicy::Id => member.id.map(str::to_string),
                IdentityPolicy::Label => None,
            },
            name: member.label.map(str::to_string),
            prior_as_child: 0.0,
            prior_as_parent: 0.0,
            inbound: 0.0,
            outbound: 0.0,
        }
    }

    /// The larger of the two role accumulators; the child side wins ties.
    pub(crate) fn reconciled_prior(&self) -> f64 {
        if self.prior_as_child >= self.prior_as_parent {
            self.prior_as_child
        } else {
            self.prior_as_parent
        }
    }

    fn into_node(self) -> Result<SankeyNode, ChartError> {
        let prior = self.reconciled_prior();
        let value = self.inbound.max(self.outbound);
        Ok(SankeyNode {
            label: format_label(value, Some(prior))?,
            id: self.id,
            name: self.name,
            value,
            prior,
        })
    }
}

// ============================================================================
// FLOW ACCUMULATION
// ============================================================================

struct FlowBuilder<'r> {
    identity: IdentityPolicy,
    nodes: FirstSighting<'r, FlowAccumulator>,
    links: Vec<SankeyLink>,
}

impl<'r> FlowBuilder<'r> {
    fn new(identity: IdentityPolicy, row_count: usize) -> Self {
        FlowBuilder {
            identity,
            nodes: FirstSighting::new(),
            links: Vec::with_capacity(row_count),
        }
    }

    fn node(&mut self, member: &Member<'r>) -> &mut FlowAccumulator {
        let identity = self.identity;
        let key = identity.key_of(member);
        self.nodes
            .sight(key, || FlowAccumulator::new(identity, member))
            .0
    }

    /// Records one parent -> child flow. The child is sighted first.
    fn flow(
        &mut self,
        parent: &Member<'r>,
        child: &Member<'r>,
        value: Option<f64>,
        prior: f64,
    ) -> Result<(), ChartError> {
        let amount = value.unwrap_or(0.0);

        let child_node = self.node(child);
        child_node.prior_as_child += prior;
        child_node.inbound += amount;

        let parent_node = self.node(parent);
        parent_node.prior_as_parent += prior;
        parent_node.outbound += amount;

        self.links.push(SankeyLink {
            source: self.identity.key_of(parent).map(str::to_string),
            target: self.identity.key_of(child).map(str::to_string),
            value,
            prior,
            label: value.map(|v| format_label(v, Some(prior))).transpose()?,
        });
        Ok(())
    }

    fn finish(self) -> Result<SankeyModel, ChartError> {
        let nodes = self
            .nodes
            .into_nodes()
            .into_iter()
            .map(FlowAccumulator::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SankeyModel {
            nodes,
            links: self.links,
        })
    }
}

/// Value and prior-period measures bound to flow roles.
struct FlowMeasures<'m> {
    current: &'m Descriptor,
    prior: Option<&'m Descriptor>,
}

impl<'m> FlowMeasures<'m> {
    fn bind(metadata: &'m NormalizedMetadata, chart: ChartKind) -> Result<Self, ChartError> {
        let current = roles::measure(metadata, 0, chart, "flow measure")?;
        let prior = metadata.measure(1);
        if prior.is_none() {
            log_debug!(
                LOG_CATEGORY,
                "no prior-period measure configured; deltas default to zero"
            );
        }
        Ok(FlowMeasures { current, prior })
    }

    /// (current, prior) for one row. The prior is 0 when no comparison
    /// measure is configured or the row carries none.
    fn read(
        &self,
        resolver: &IdentityResolver,
        row: &Row,
        row_index: usize,
    ) -> Result<(Option<f64>, f64), ChartError> {
        let current = resolver.measure(row, row_index, self.current)?;
        let prior = match self.prior {
            Some(descriptor) => resolver.measure(row, row_index, descriptor)?.unwrap_or(0.0),
            None => 0.0,
        };
        Ok((current, prior))
    }
}

// ============================================================================
// BUILDS
// ============================================================================

/// Builds a sankey from `[parent, child]` dimension pairs.
///
/// Every row yields exactly one link.
pub fn build_sankey(
    rows: &[Row],
    metadata: &NormalizedMetadata,
    definition: &ChartDefinition,
) -> Result<SankeyModel, ChartError> {
    let parent_dim = roles::dimension(metadata, 0, ChartKind::Sankey, "parent dimension")?;
    let child_dim = roles::dimension(metadata, 1, ChartKind::Sankey, "child dimension")?;
    let measures = FlowMeasures::bind(metadata, ChartKind::Sankey)?;
    let resolver = definition.resolver();
    let mut builder = FlowBuilder::new(definition.identity, rows.len());

    for (i, row) in rows.iter().enumerate() {
        let parent = roles::member(&resolver, row, i, parent_dim, LOG_CATEGORY)?;
        let child = roles::member(&resolver, row, i, child_dim, LOG_CATEGORY)?;
        let (value, prior) = measures.read(&resolver, row, i)?;
        builder.flow(&parent, &child, value, prior)?;
    }

    let model = builder.finish()?;
    log_info!(
        LOG_CATEGORY,
        "built sankey rows={} nodes={} links={}",
        rows.len(),
        model.nodes.len(),
        model.links.len()
    );
    Ok(model)
}

/// Builds a sankey from a single parent-child hierarchy dimension.
///
/// Each row's member becomes a node. A link from the parent member is
/// added when some row carries a member whose id equals this row's
/// `parentId`; roots and orphans produce no link. Measures are still read
/// (and validated) on every row, linked or not.
pub fn build_hierarchy(
    rows: &[Row],
    metadata: &NormalizedMetadata,
    definition: &ChartDefinition,
) -> Result<SankeyModel, ChartError> {
    let dimension = roles::dimension(metadata, 0, ChartKind::Hierarchy, "hierarchy dimension")?;
    let measures = FlowMeasures::bind(metadata, ChartKind::Hierarchy)?;
    let resolver = definition.resolver();

    let members = rows
        .iter()
        .enumerate()
        .map(|(i, row)| roles::member(&resolver, row, i, dimension, LOG_CATEGORY))
        .collect::<Result<Vec<_>, _>>()?;

    // First row carrying each id.
    let mut by_id: FxHashMap<&str, Member<'_>> = FxHashMap::default();
    for member in &members {
        if let Some(id) = member.id {
            by_id.entry(id).or_insert(*member);
        }
    }

    let mut builder = FlowBuilder::new(definition.identity, rows.len());
    let mut orphans = 0usize;

    for (i, (row, member)) in rows.iter().zip(&members).enumerate() {
        builder.node(member);
        let (value, prior) = measures.read(&resolver, row, i)?;

        let Some(parent_id) = member.parent_id else {
            continue;
        };
        match by_id.get(parent_id) {
            Some(parent) => builder.flow(parent, member, value, prior)?,
            None => orphans += 1,
        }
    }

    let model = builder.finish()?;
    log_info!(
        LOG_CATEGORY,
        "built hierarchy rows={} nodes={} links={} orphans={}",
        rows.len(),
        model.nodes.len(),
        model.links.len(),
        orphans
    );
    Ok(model)
}
