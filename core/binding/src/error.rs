//! FILENAME: core/binding/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Row {row} has no value for field '{field}'")]
    MissingField { row: usize, field: String },

    #[error("Invalid value for {context}: {value}")]
    InvalidValue { context: String, value: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
