//! FILENAME: core/chart-engine/src/error.rs

use binding::BindingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("{chart} chart requires a {role}, but the metadata declares none")]
    MissingRole {
        chart: &'static str,
        role: &'static str,
    },

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
