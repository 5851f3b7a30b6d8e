//! solid-populate: declarative population of application data from Solid pods
//!
//! An application describes, in a schema, which properties it wants from
//! which subjects, including typed collections found through a subject's
//! type index. The engine resolves that schema against a linked-data graph
//! into a tree of values, and a driver re-runs it whenever a session is
//! established.
//!
//! # Core Concepts
//!
//! - **GraphAccessor**: async, one-hop-at-a-time read access to the graph
//! - **TypeIndex**: finds where instances of a class live for a subject
//! - **Populator**: resolves a schema into a `ResolvedTree`
//! - **PopulationDriver**: re-populates on every session establishment
//!
//! # Example
//!
//! ```
//! use solid_populate::{MemoryGraph, Populator, Schema};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let graph = Arc::new(MemoryGraph::new());
//! let (schema, _) = Schema::from_value(&serde_json::json!({
//!     "user": { "name": "foaf:name" }
//! })).unwrap();
//! let tree = Populator::new(graph).populate_schema(&schema).await;
//! assert_eq!(tree.to_json(), serde_json::json!({ "user": {} }));
//! # });
//! ```

pub mod config;
pub mod driver;
pub mod graph;
pub mod populate;
pub mod schema;
pub mod session;
pub mod type_index;

pub use config::{default_config_path, Config, ConfigError};
pub use driver::{DriverConfig, DriverHandle, DriverState, Population, PopulationDriver};
pub use graph::{
    AccessError, AccessResult, GraphAccessor, Literal, MemoryGraph, NodeRef, Prefixes, SubjectRef,
    Term, Vocabulary,
};
pub use populate::{PopulateError, Populator, Resolved, ResolvedObject, ResolvedTree};
pub use schema::{FieldMap, PropertySpec, Schema, SchemaDiagnostic, SchemaError, SchemaField};
pub use session::{wait_for_session, Session, SessionGate, SessionState, SessionStatus, SessionTracker};
pub use type_index::TypeIndex;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
