//! FILENAME: core/chart-engine/src/graph.rs
//! Graph Builder - rows -> deduplicated nodes, per-row edges, sorted categories.
//!
//! Algorithm, per row:
//! 1. Resolve source, target and category members
//! 2. Sight the target node, then the source node; a node's category is
//!    fixed by the row that first introduced it (first write wins)
//! 3. Append one edge; parallel edges are never merged
//! 4. Collect category names from both ends
//!
//! Categories are finally sorted ascending by name.

use binding::{Descriptor, IdentityPolicy, Member, NormalizedMetadata, Row};
use rustc_hash::FxHashSet;

use crate::definition::{CategoryMode, ChartDefinition, ChartKind, RoleOrder};
use crate::error::ChartError;
use crate::logging::{log_debug, log_info};
use crate::registry::FirstSighting;
use crate::roles;
use crate::view::{Category, Edge, GraphModel, GraphNode};

const LOG_CATEGORY: &str = "GRAPH";

// ============================================================================
// ROLE BINDING
// ============================================================================

/// Descriptors bound to graph roles.
struct GraphRoles<'m> {
    source: &'m Descriptor,
    target: &'m Descriptor,
    source_category: Option<&'m Descriptor>,
    target_category: Option<&'m Descriptor>,
    measure: &'m Descriptor,
}

impl<'m> GraphRoles<'m> {
    fn bind(
        metadata: &'m NormalizedMetadata,
        definition: &ChartDefinition,
    ) -> Result<Self, ChartError> {
        let (source_pos, target_pos) = match definition.graph.role_order {
            RoleOrder::SourceTarget => (0, 1),
            RoleOrder::TargetSource => (1, 0),
        };
        let source = roles::dimension(metadata, source_pos, ChartKind::Graph, "source dimension")?;
        let target = roles::dimension(metadata, target_pos, ChartKind::Graph, "target dimension")?;

        let source_category = metadata.dimension(2);
        let target_category = match definition.graph.categories {
            CategoryMode::Shared => source_category,
            CategoryMode::Split => metadata.dimension(3),
        };

        // Additional measures are ignored.
        let measure = roles::measure(metadata, 0, ChartKind::Graph, "measure")?;

        Ok(GraphRoles {
            source,
            target,
            source_category,
            target_category,
            measure,
        })
    }
}

// ============================================================================
// ACCUMULATOR
// ============================================================================

/// Working set of one build. Borrows labels from the rows and is consumed
/// into a `GraphModel` at the end.
struct GraphAccumulator<'r> {
    identity: IdentityPolicy,
    nodes: FirstSighting<'r, GraphNode>,
    links: Vec<Edge>,
    categories: FxHashSet<&'r str>,
}

impl<'r> GraphAccumulator<'r> {
    fn new(identity: IdentityPolicy, row_count: usize) -> Self {
        GraphAccumulator {
            identity,
            nodes: FirstSighting::new(),
            links: Vec::with_capacity(row_count),
            categories: FxHashSet::default(),
        }
    }

    fn sight(&mut self, member: &Member<'r>, category: Option<&'r str>) {
        let key = self.identity.key_of(member);
        let identity = self.identity;
        let (node, created) = self.nodes.sight(key, || GraphNode {
            id: match identity {
                IdentityPolicy::Id => key.map(str::to_string),
                IdentityPolicy::Label => None,
            },
            name: member.label.map(str::to_string),
            category: category.map(str::to_string),
        });

        if !created && category.is_some() && node.category.as_deref() != category {
            log_debug!(
                LOG_CATEGORY,
                "node {:?} keeps category {:?}; ignoring {:?}",
                key,
                node.category,
                category
            );
        }
    }

    fn link(&mut self, source: &Member<'r>, target: &Member<'r>, value: Option<f64>) {
        self.links.push(Edge {
            source: self.identity.key_of(source).map(str::to_string),
            target: self.identity.key_of(target).map(str::to_string),
            value,
        });
    }

    fn finish(self) -> GraphModel {
        let mut categories: Vec<Category> = self
            .categories
            .into_iter()
            .map(|name| Category {
                name: name.to_string(),
            })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        GraphModel {
            nodes: self.nodes.into_nodes(),
            links: self.links,
            categories,
        }
    }
}

// ============================================================================
// BUILD
// ============================================================================

/// Builds a node/link graph from `rows`.
///
/// Needs at least two dimensions and one measure. A third (and, in split
/// mode, fourth) dimension provides node categories when present.
pub fn build_graph(
    rows: &[Row],
    metadata: &NormalizedMetadata,
    definition: &ChartDefinition,
) -> Result<GraphModel, ChartError> {
    let roles = GraphRoles::bind(metadata, definition)?;
    let resolver = definition.resolver();
    let mut acc = GraphAccumulator::new(definition.identity, rows.len());

    for (i, row) in rows.iter().enumerate() {
        let source = roles::member(&resolver, row, i, roles.source, LOG_CATEGORY)?;
        let target = roles::member(&resolver, row, i, roles.target, LOG_CATEGORY)?;
        let source_category = category_label(&resolver, row, i, roles.source_category)?;
        let target_category = match definition.graph.categories {
            CategoryMode::Shared => source_category,
            CategoryMode::Split => category_label(&resolver, row, i, roles.target_category)?,
        };
        let value = resolver.measure(row, i, roles.measure)?;

        acc.sight(&target, target_category);
        acc.sight(&source, source_category);
        acc.link(&source, &target, value);

        acc.categories
            .extend([source_category, target_category].into_iter().flatten());
    }

    let model = acc.finish();
    log_info!(
        LOG_CATEGORY,
        "built graph rows={} nodes={} links={} categories={}",
        rows.len(),
        model.nodes.len(),
        model.links.len(),
        model.categories.len()
    );
    Ok(model)
}

fn category_label<'r>(
    resolver: &binding::IdentityResolver,
    row: &'r Row,
    row_index: usize,
    dimension: Option<&Descriptor>,
) -> Result<Option<&'r str>, ChartError> {
    match dimension {
        Some(d) => Ok(roles::attribute(resolver, row, row_index, d, LOG_CATEGORY)?.label),
        None => Ok(None),
    }
}
