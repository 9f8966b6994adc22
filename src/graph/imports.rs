//! Import dependency view of a PackageGraph.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::{LoadPath, RefKind};
use crate::graph::PackageGraph;

/// Package-level import edges, collapsed from the per-file Import refs.
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    graph: DiGraph<LoadPath, ()>,
    pkg_to_node: HashMap<LoadPath, NodeIndex>,
}

impl ImportGraph {
    /// Build the import view of `packages`.
    pub fn build(packages: &PackageGraph) -> Self {
        let mut graph = ImportGraph::default();
        for pkg in packages.sorted_packages() {
            graph.add_package(pkg.path());
        }
        for r in packages.refs().filter(|r| r.kind == RefKind::Import) {
            graph.add_edge(r.from_package, r.to_package);
        }
        graph
    }

    fn add_package(&mut self, path: LoadPath) {
        if self.pkg_to_node.contains_key(&path) {
            return;
        }
        let node = self.graph.add_node(path);
        self.pkg_to_node.insert(path, node);
    }

    fn add_edge(&mut self, from: LoadPath, to: LoadPath) {
        if let (Some(&from_node), Some(&to_node)) =
            (self.pkg_to_node.get(&from), self.pkg_to_node.get(&to))
        {
            if !self.graph.contains_edge(from_node, to_node) {
                self.graph.add_edge(from_node, to_node, ());
            }
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.pkg_to_node.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Packages imported by `path`, sorted.
    pub fn dependencies(&self, path: &str) -> Vec<LoadPath> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Packages importing `path`, sorted.
    pub fn dependents(&self, path: &str) -> Vec<LoadPath> {
        self.neighbors(path, Direction::Incoming)
    }

    fn neighbors(&self, path: &str, dir: Direction) -> Vec<LoadPath> {
        let Some(&node) = self.pkg_to_node.get(path) else {
            return Vec::new();
        };
        let mut out: Vec<_> = self
            .graph
            .neighbors_directed(node, dir)
            .map(|n| self.graph[n])
            .collect();
        out.sort();
        out
    }

    /// Render the dependency tree below `root`, one package per line.
    /// A package already printed is marked `(*)` and not expanded again.
    pub fn render_tree(&self, root: &str, max_depth: Option<usize>) -> String {
        let mut out = String::new();
        let mut seen = HashSet::new();
        if let Some(&node) = self.pkg_to_node.get(root) {
            let max_depth = max_depth.unwrap_or(usize::MAX);
            self.render_node(self.graph[node], 0, max_depth, &mut seen, &mut out);
        }
        out
    }

    fn render_node(
        &self,
        path: LoadPath,
        depth: usize,
        max_depth: usize,
        seen: &mut HashSet<LoadPath>,
        out: &mut String,
    ) {
        if depth > max_depth {
            return;
        }

        let is_duplicate = !seen.insert(path);

        let prefix = if depth == 0 {
            String::new()
        } else {
            format!("{}├── ", "│   ".repeat(depth - 1))
        };
        let dup_marker = if is_duplicate { " (*)" } else { "" };
        let _ = writeln!(out, "{}{}{}", prefix, path, dup_marker);

        if is_duplicate {
            return;
        }

        for dep in self.dependencies(&path) {
            self.render_node(dep, depth + 1, max_depth, seen, out);
        }
    }
}

impl PackageGraph {
    /// Package-level import edges of this graph.
    pub fn import_graph(&self) -> ImportGraph {
        ImportGraph::build(self)
    }
}
