//! Read-only lookups over a completed graph.

use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::core::{Package, Ref, RefKind};
use crate::graph::PackageGraph;

/// Packages at or below `prefix`, ordered by load-path.
pub fn packages<'g>(graph: &'g PackageGraph, prefix: Option<&str>) -> Vec<&'g Package> {
    graph
        .sorted_packages()
        .into_iter()
        .filter(|p| prefix.map_or(true, |prefix| p.path().is_under(prefix)))
        .collect()
}

/// Corpus-relative files of a package.
pub fn files<'g>(graph: &'g PackageGraph, load_path: &str) -> Result<&'g [String]> {
    graph
        .package(load_path)
        .map(Package::files)
        .ok_or_else(|| unknown_package(load_path))
}

/// Refs with either end in `file`, ordered by position in that file.
pub fn annotations(graph: &PackageGraph, file: &str) -> Vec<Arc<Ref>> {
    let mut refs: Vec<_> = graph
        .refs()
        .filter(|r| r.touches_file(file))
        .cloned()
        .collect();
    refs.sort_by(|a, b| {
        let key = |r: &Ref| {
            let pos = if r.from_position.file == file {
                &r.from_position
            } else {
                &r.to_position
            };
            (pos.start_line, pos.start_col, r.kind)
        };
        key(a).cmp(&key(b))
    });
    refs
}

/// Types and interfaces satisfying the interface `ident` of `load_path`.
pub fn implementations(graph: &PackageGraph, load_path: &str, ident: &str) -> Result<Vec<Arc<Ref>>> {
    incoming(graph, load_path, ident, RefKind::is_structural)
}

/// Call sites of the function `ident` of `load_path`.
pub fn callers(graph: &PackageGraph, load_path: &str, ident: &str) -> Result<Vec<Arc<Ref>>> {
    incoming(graph, load_path, ident, |k| *k == RefKind::Call)
}

fn incoming(
    graph: &PackageGraph,
    load_path: &str,
    ident: &str,
    kind: impl Fn(&RefKind) -> bool,
) -> Result<Vec<Arc<Ref>>> {
    let pkg = graph
        .package(load_path)
        .ok_or_else(|| unknown_package(load_path))?;
    let mut refs: Vec<_> = pkg
        .in_refs()
        .iter()
        .filter(|r| r.to_ident == ident && kind(&r.kind))
        .cloned()
        .collect();
    refs.sort_by(|a, b| {
        (a.from_package, &a.from_ident, a.kind).cmp(&(b.from_package, &b.from_ident, b.kind))
    });
    Ok(refs)
}

fn unknown_package(load_path: &str) -> anyhow::Error {
    anyhow!(
        "package `{}` is not in the graph\n\
         help: check the load-path, or pass it as an entry package",
        load_path
    )
}
