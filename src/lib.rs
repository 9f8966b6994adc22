//! refgraph - a cross-package reference graph for package-based languages
//!
//! This crate builds a graph whose nodes are packages and whose edges are
//! source-level references between them: imports, calls, instantiations,
//! plain references, and the interface implementation and extension
//! relations computed over every pair of loaded packages.

pub mod core;
pub mod graph;
pub mod ops;
pub mod resolver;
pub mod store;
pub mod util;

/// Fixture universes and helpers for refgraph unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    corpus::Corpus, load_path::LoadPath, package::Package, position::Position,
    ref_kind::RefKind, reference::Ref,
};

pub use graph::PackageGraph;
pub use resolver::{SnapshotResolver, SymbolResolver};
pub use util::Config;
