//! Population engine
//!
//! Turns a schema into a resolved value tree by walking the graph: leaves
//! are single property lookups, typed collections go through the type
//! index and recurse into each instance.

mod engine;
mod resolved;

pub use engine::{PopulateError, PopulateResult, Populator};
pub use resolved::{Resolved, ResolvedObject, ResolvedTree};
