//! FILENAME: core/binding/src/lib.rs
//! PURPOSE: Input boundary for chart data binding.
//! CONTEXT: Describes the result set handed over by the analytics host
//! (rows of cells keyed by dimension/measure id, plus metadata) and the
//! two leaf transforms every chart variant shares:
//! - `metadata`: mapping-keyed descriptors -> ordered descriptor lists
//! - `identity`: cell -> display identity used for node dedup

pub mod cell;
pub mod data_binding;
pub mod error;
pub mod identity;
pub mod metadata;

// Re-export commonly used types at the crate root
pub use cell::{Cell, Row};
pub use data_binding::{BindingState, DataBinding};
pub use error::BindingError;
pub use identity::{ensure_finite, IdentityPolicy, IdentityResolver, Member, MissingFieldPolicy};
pub use metadata::{normalize_metadata, Descriptor, Metadata, NormalizedMetadata};
