//! Test utilities for refgraph unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use refgraph::test_support::{fixtures, graph_of};
//!
//! #[test]
//! fn test_example() {
//!     let graph = graph_of(fixtures::simple(), &["simple/main"]);
//!     assert!(graph.contains("fmt"));
//! }
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};

use crate::core::{Corpus, Package, Ref, RefKind};
use crate::graph::{ConstantVersion, PackageGraph};
use crate::resolver::{ResolvedPackage, Snapshot, SnapshotResolver};

pub use fixtures::{PackageFixture, ROOT};

/// The corpus every fixture lives in.
pub fn fixture_corpus() -> Corpus {
    Corpus::new(ROOT).unwrap()
}

/// An empty graph over `packages`, at constant version 1.
pub fn graph_over(packages: Vec<ResolvedPackage>) -> PackageGraph {
    PackageGraph::new(SnapshotResolver::from_packages(packages), ConstantVersion(1))
        .with_corpora([fixture_corpus()])
}

/// A graph over `packages` with `entries` loaded.
pub fn graph_of(packages: Vec<ResolvedPackage>, entries: &[&str]) -> PackageGraph {
    let mut graph = graph_over(packages);
    graph.load_programs(entries, false).unwrap();
    graph
}

/// Write `packages` as a snapshot file in `dir`.
pub fn write_snapshot(dir: &Path, packages: Vec<ResolvedPackage>) -> PathBuf {
    let path = dir.join("snapshot.json");
    let snapshot = Snapshot { packages };
    std::fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    path
}

/// Whether `refs` holds a ref of `kind` from `from.from_ident` to
/// `to.to_ident`.
pub fn has_ref(refs: &[std::sync::Arc<Ref>], kind: RefKind, from: (&str, &str), to: (&str, &str)) -> bool {
    refs.iter().any(|r| {
        r.kind == kind
            && r.from_package == from.0
            && r.from_ident == from.1
            && r.to_package == to.0
            && r.to_ident == to.1
    })
}

/// Asserts that a ref is recorded on both of its packages, or on
/// neither.
pub fn assert_ref(
    graph: &PackageGraph,
    kind: RefKind,
    from: (&str, &str),
    to: (&str, &str),
    should: bool,
) {
    let from_pkg: &Package = graph.package(from.0).unwrap();
    let to_pkg: &Package = graph.package(to.0).unwrap();
    let out = has_ref(from_pkg.out_refs(), kind, from, to);
    let inr = has_ref(to_pkg.in_refs(), kind, from, to);
    assert_eq!(
        out, should,
        "{} of {}.{} by {}.{} in out-refs: {}",
        kind, to.0, to.1, from.0, from.1, out
    );
    assert_eq!(
        inr, should,
        "{} of {}.{} by {}.{} in in-refs: {}",
        kind, to.0, to.1, from.0, from.1, inr
    );
}
