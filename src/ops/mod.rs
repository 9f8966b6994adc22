//! High-level operations.
//!
//! This module contains the implementation of refgraph commands.

pub mod export;
pub mod index;
pub mod query;

pub use export::{export_refs, ExportOptions};
pub use index::{index, IndexOptions, IndexResult};
