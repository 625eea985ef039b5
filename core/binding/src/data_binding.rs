//! FILENAME: core/binding/src/data_binding.rs
//! PURPOSE: The complete payload of one data-binding update.

use serde::{Deserialize, Serialize};

use crate::cell::Row;
use crate::error::BindingError;
use crate::metadata::Metadata;

/// Lifecycle state reported by the host for the bound result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingState {
    Success,
    Loading,
    Error,
    #[serde(other)]
    Other,
}

impl Default for BindingState {
    fn default() -> Self {
        BindingState::Other
    }
}

/// A materialized result set plus the metadata describing its columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataBinding {
    #[serde(default)]
    pub state: BindingState,

    #[serde(default)]
    pub data: Vec<Row>,

    #[serde(default)]
    pub metadata: Metadata,
}

impl DataBinding {
    /// A successful binding over the given rows.
    pub fn success(data: Vec<Row>, metadata: Metadata) -> Self {
        DataBinding {
            state: BindingState::Success,
            data,
            metadata,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, BindingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Only a successful binding may produce a chart model.
    pub fn is_success(&self) -> bool {
        self.state == BindingState::Success
    }
}
