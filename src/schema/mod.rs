//! Population schemas
//!
//! An application declares, per top-level field, a subject and the
//! properties it wants from it. Properties are either predicates (leaves)
//! or typed collections discovered through the subject's type index.

mod document;
mod normalize;
mod types;

pub use document::{Schema, SchemaError, SchemaResult};
pub use types::{FieldMap, PropertySpec, SchemaDiagnostic, SchemaField};
