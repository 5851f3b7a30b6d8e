//! Common test utilities
//!
//! Pod fixtures built on `MemoryGraph`, plus accessor wrappers that inject
//! failures or hold lookups until released.

#![allow(dead_code, unused_imports)]

pub mod accessors;
pub mod pods;

pub use accessors::{CountingAccessor, FailingAccessor, GatedAccessor};
pub use pods::{recipe_pod, ALICE, RECIPES, TYPE_INDEX};
