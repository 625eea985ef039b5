//! FILENAME: core/chart-engine/src/engine.rs
//! Render dispatch - the entry point the widget host calls once per
//! completed data-binding update.
//!
//! 1. Short-circuit unless the binding state is `success`
//! 2. Normalize metadata into positional descriptor lists
//! 3. Run the builder for the configured chart kind
//!
//! Each call owns its working set; nothing survives between renders.

use binding::DataBinding;

use crate::definition::{ChartDefinition, ChartKind};
use crate::error::ChartError;
use crate::flow::{build_hierarchy, build_sankey};
use crate::gauge::build_gauge;
use crate::graph::build_graph;
use crate::logging::log_debug;
use crate::view::ChartModel;

/// Turns a data binding into a chart model.
///
/// Returns `Ok(None)` when the binding is not in the `success` state: no
/// model and no error, so the host simply keeps an empty chart.
pub fn render(
    binding: &DataBinding,
    definition: &ChartDefinition,
) -> Result<Option<ChartModel>, ChartError> {
    if !binding.is_success() {
        log_debug!("RENDER", "skipping render: binding state is {:?}", binding.state);
        return Ok(None);
    }

    let metadata = binding.metadata.normalize();
    let rows = binding.data.as_slice();
    log_debug!(
        "RENDER",
        "render kind={} rows={} dimensions={} measures={}",
        definition.kind.name(),
        rows.len(),
        metadata.dimensions.len(),
        metadata.measures.len()
    );

    let model = match definition.kind {
        ChartKind::Graph => ChartModel::Graph(build_graph(rows, &metadata, definition)?),
        ChartKind::Sankey => ChartModel::Sankey(build_sankey(rows, &metadata, definition)?),
        ChartKind::Hierarchy => ChartModel::Sankey(build_hierarchy(rows, &metadata, definition)?),
        ChartKind::Gauge => ChartModel::Gauge(build_gauge(rows, &metadata, definition)?),
    };
    Ok(Some(model))
}
