//! Linked-data graph access

mod accessor;
mod memory;
mod term;
pub mod vocab;

pub use accessor::{AccessError, AccessResult, GraphAccessor, SubjectStream};
pub use memory::{MemoryGraph, DEFAULT_PRINCIPAL_ALIAS};
pub use term::{Literal, NodeRef, SubjectRef, Term};
pub use vocab::{Prefixes, Vocabulary};
