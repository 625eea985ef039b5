//! FILENAME: core/chart-engine/src/gauge.rs
//! PURPOSE: Single-value gauge: the first row's first measure.

use binding::{NormalizedMetadata, Row};

use crate::definition::{ChartDefinition, ChartKind};
use crate::error::ChartError;
use crate::label::round2;
use crate::logging::log_info;
use crate::roles;
use crate::view::GaugeModel;

pub fn build_gauge(
    rows: &[Row],
    metadata: &NormalizedMetadata,
    definition: &ChartDefinition,
) -> Result<GaugeModel, ChartError> {
    let measure = roles::measure(metadata, 0, ChartKind::Gauge, "gauge measure")?;
    let resolver = definition.resolver();

    let value = match rows.first() {
        Some(row) => resolver.measure(row, 0, measure)?.map(round2),
        None => None,
    };

    log_info!("GAUGE", "built gauge rows={} value={:?}", rows.len(), value);
    Ok(GaugeModel {
        value,
        min: definition.gauge.min,
        max: definition.gauge.max,
    })
}
