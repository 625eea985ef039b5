//! FILENAME: core/binding/src/identity.rs
//! PURPOSE: Resolves role-bound cells of a row into member identities and
//! measure values.
//! CONTEXT: Node dedup is keyed by a single function, `IdentityPolicy::key_of`.
//! The default keys by display label, so two members sharing a label
//! collapse into one node; `IdentityPolicy::Id` keys by the stable id.

use serde::{Deserialize, Serialize};

use crate::cell::Row;
use crate::error::BindingError;
use crate::metadata::Descriptor;

// ============================================================================
// POLICIES
// ============================================================================

/// Which part of a member cell identifies a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentityPolicy {
    /// Dedup by display label.
    Label,
    /// Dedup by stable member id.
    Id,
}

impl Default for IdentityPolicy {
    fn default() -> Self {
        IdentityPolicy::Label
    }
}

impl IdentityPolicy {
    /// The dedup key of a resolved member.
    pub fn key_of<'a>(&self, member: &Member<'a>) -> Option<&'a str> {
        match self {
            IdentityPolicy::Label => member.label,
            IdentityPolicy::Id => member.id,
        }
    }
}

/// What to do when a row lacks a cell (or the cell lacks its value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingFieldPolicy {
    /// Carry the absence into the output as `None`.
    Propagate,
    /// Fail the build with `BindingError::MissingField`.
    Reject,
}

impl Default for MissingFieldPolicy {
    fn default() -> Self {
        MissingFieldPolicy::Propagate
    }
}

// ============================================================================
// RESOLVED VALUES
// ============================================================================

/// Display identity of one dimension cell, borrowed from the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Member<'a> {
    pub label: Option<&'a str>,
    pub id: Option<&'a str>,
    pub parent_id: Option<&'a str>,
}

impl<'a> Member<'a> {
    /// A member whose cell was missing from the row.
    pub fn absent() -> Self {
        Member::default()
    }

    pub fn is_absent(&self) -> bool {
        self.label.is_none() && self.id.is_none()
    }
}

/// Fails with `InvalidValue` unless `value` is finite.
pub fn ensure_finite(value: f64, context: impl Into<String>) -> Result<f64, BindingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BindingError::InvalidValue {
            context: context.into(),
            value,
        })
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Reads role-bound cells out of rows under a missing-field policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver {
    missing_fields: MissingFieldPolicy,
    identity: IdentityPolicy,
}

impl IdentityResolver {
    pub fn new(missing_fields: MissingFieldPolicy, identity: IdentityPolicy) -> Self {
        IdentityResolver {
            missing_fields,
            identity,
        }
    }

    pub fn policy(&self) -> MissingFieldPolicy {
        self.missing_fields
    }

    pub fn identity(&self) -> IdentityPolicy {
        self.identity
    }

    /// Resolves the node member a row holds for `dimension`.
    ///
    /// Under `Reject` both the label and the dedup key chosen by the
    /// identity policy must be present; otherwise `MissingField`. Under
    /// `Propagate` absent parts stay `None`. `parentId` is always optional.
    pub fn member<'r>(
        &self,
        row: &'r Row,
        row_index: usize,
        dimension: &Descriptor,
    ) -> Result<Member<'r>, BindingError> {
        let member = self.attribute(row, row_index, dimension)?;
        if member.label.is_some() && self.identity.key_of(&member).is_none() {
            self.missing(row_index, &format!("{}.id", dimension.key))?;
        }
        Ok(member)
    }

    /// Resolves a descriptive member (e.g. a category) that is read by
    /// label only, whatever the identity policy.
    pub fn attribute<'r>(
        &self,
        row: &'r Row,
        row_index: usize,
        dimension: &Descriptor,
    ) -> Result<Member<'r>, BindingError> {
        let member = match row.get(&dimension.key) {
            Some(cell) => Member {
                label: cell.label.as_deref(),
                id: cell.id.as_deref(),
                parent_id: cell.parent_id.as_deref(),
            },
            None => Member::absent(),
        };

        if member.label.is_none() {
            self.missing(row_index, &dimension.key)?;
        }
        Ok(member)
    }

    /// Resolves the measure value a row holds for `measure`.
    ///
    /// Non-finite values are rejected regardless of policy.
    pub fn measure(
        &self,
        row: &Row,
        row_index: usize,
        measure: &Descriptor,
    ) -> Result<Option<f64>, BindingError> {
        match row.get(&measure.key).and_then(|cell| cell.raw) {
            Some(raw) => {
                let context = format!("row {} field '{}'", row_index, measure.key);
                ensure_finite(raw, context).map(Some)
            }
            None => {
                self.missing(row_index, &measure.key)?;
                Ok(None)
            }
        }
    }

    fn missing(&self, row_index: usize, field: &str) -> Result<(), BindingError> {
        match self.missing_fields {
            MissingFieldPolicy::Propagate => Ok(()),
            MissingFieldPolicy::Reject => Err(BindingError::MissingField {
                row: row_index,
                field: field.to_string(),
            }),
        }
    }
}
