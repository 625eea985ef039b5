//! FILENAME: core/chart-engine/src/lib.rs
//! Chart data-binding engine.
//!
//! Turns a bound result set (rows of cells keyed by dimension/measure id)
//! into chart-ready models. Rendering is left to the charting backend; this
//! crate only decides which nodes, links, categories and labels exist.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the chart IS)
//! - `view`: Output models for the renderer (WHAT we display)
//! - `graph`, `flow`, `gauge`: Builders (HOW each chart variant is derived)
//! - `label`: Magnitude and period-over-period label formatting
//! - `engine`: Dispatch from a data binding to the right builder

mod logging;
mod registry;
mod roles;

pub mod definition;
pub mod engine;
pub mod error;
pub mod flow;
pub mod gauge;
pub mod graph;
pub mod label;
pub mod view;

pub use definition::*;
pub use engine::render;
pub use error::ChartError;
pub use flow::{build_hierarchy, build_sankey};
pub use gauge::build_gauge;
pub use graph::build_graph;
pub use label::{format_label, round2, DeltaSign, FormattedLabel};
pub use view::*;
