//! FILENAME: core/chart-engine/src/roles.rs
// PURPOSE: Binds positional dimensions/measures to chart roles and resolves
//          role-bound cells row by row.

use binding::{Descriptor, IdentityResolver, Member, NormalizedMetadata, Row};

use crate::definition::ChartKind;
use crate::error::ChartError;
use crate::logging::log_warn;

/// The dimension at `position`, or `MissingRole` if the metadata has none.
pub(crate) fn dimension<'m>(
    metadata: &'m NormalizedMetadata,
    position: usize,
    chart: ChartKind,
    role: &'static str,
) -> Result<&'m Descriptor, ChartError> {
    metadata.dimension(position).ok_or(ChartError::MissingRole {
        chart: chart.name(),
        role,
    })
}

/// The measure at `position`, or `MissingRole` if the metadata has none.
pub(crate) fn measure<'m>(
    metadata: &'m NormalizedMetadata,
    position: usize,
    chart: ChartKind,
    role: &'static str,
) -> Result<&'m Descriptor, ChartError> {
    metadata.measure(position).ok_or(ChartError::MissingRole {
        chart: chart.name(),
        role,
    })
}

/// Resolves a member, noting in the log when it is carried through as absent.
pub(crate) fn member<'r>(
    resolver: &IdentityResolver,
    row: &'r Row,
    row_index: usize,
    dimension: &Descriptor,
    category: &'static str,
) -> Result<Member<'r>, ChartError> {
    let member = resolver.member(row, row_index, dimension)?;
    note_absent(&member, row_index, dimension, category);
    Ok(member)
}

/// Resolves a label-only member such as a category.
pub(crate) fn attribute<'r>(
    resolver: &IdentityResolver,
    row: &'r Row,
    row_index: usize,
    dimension: &Descriptor,
    category: &'static str,
) -> Result<Member<'r>, ChartError> {
    let member = resolver.attribute(row, row_index, dimension)?;
    note_absent(&member, row_index, dimension, category);
    Ok(member)
}

fn note_absent(member: &Member<'_>, row_index: usize, dimension: &Descriptor, category: &str) {
    if member.label.is_none() {
        log_warn!(
            category,
            "row {} has no label for '{}'; propagating as absent",
            row_index,
            dimension.key
        );
    }
}
