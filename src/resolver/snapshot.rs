//! Snapshot resolver - resolution from a pre-computed universe.
//!
//! A snapshot is the JSON dump of every package an external type-checker
//! has analyzed. Resolving a program selects the import closure of the
//! requested entry packages from it, using the same vendor lookup order
//! the graph uses.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::vendor::resolve_import;
use crate::resolver::{
    is_exported, ResolvedPackage, ResolvedProgram, ResolverError, SymbolResolver, TypeDecl,
};

/// Serialized universe of resolved packages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub packages: Vec<ResolvedPackage>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ResolverError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ResolverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ResolverError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// In-memory `SymbolResolver` over a `Snapshot`.
#[derive(Debug, Clone, Default)]
pub struct SnapshotResolver {
    packages: HashMap<String, ResolvedPackage>,
}

impl SnapshotResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_packages(packages: impl IntoIterator<Item = ResolvedPackage>) -> Self {
        let mut resolver = Self::new();
        for pkg in packages {
            resolver.add_package(pkg);
        }
        resolver
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::from_packages(snapshot.packages)
    }

    /// Load a resolver from a snapshot file.
    pub fn load(path: &Path) -> Result<Self, ResolverError> {
        let snapshot = Snapshot::load(path)?;
        tracing::debug!(
            "loaded snapshot {} with {} packages",
            path.display(),
            snapshot.packages.len()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Add or replace a package.
    pub fn add_package(&mut self, pkg: ResolvedPackage) {
        self.packages.insert(pkg.path.clone(), pkg);
    }

    pub fn contains(&self, load_path: &str) -> bool {
        self.packages.contains_key(load_path)
    }
}

impl SymbolResolver for SnapshotResolver {
    fn resolve_program(
        &self,
        load_paths: &[String],
        include_tests: bool,
    ) -> Result<ResolvedProgram, ResolverError> {
        if load_paths.is_empty() {
            return Err(ResolverError::NoEntries);
        }

        let mut queue = VecDeque::new();
        for path in load_paths {
            if !self.contains(path) {
                return Err(ResolverError::PackageNotFound {
                    load_path: path.clone(),
                });
            }
            queue.push_back(path.clone());

            if include_tests {
                let xtest = format!("{}_test", path);
                if self.contains(&xtest) {
                    queue.push_back(xtest);
                }
            }
        }

        let mut seen = BTreeSet::new();
        while let Some(path) = queue.pop_front() {
            if !seen.insert(path.clone()) {
                continue;
            }
            let Some(pkg) = self.packages.get(&path) else {
                continue;
            };
            for import in pkg.files.iter().flat_map(|f| &f.imports) {
                match resolve_import(&pkg.path, &import.path, |c| self.contains(c)) {
                    Some(target) => queue.push_back(target),
                    None => tracing::debug!(
                        "snapshot has no package for import `{}` of {}",
                        import.path,
                        pkg.path
                    ),
                }
            }
        }

        Ok(ResolvedProgram::new(
            seen.iter().filter_map(|p| self.packages.get(p)).cloned(),
        ))
    }

    fn is_assignable(&self, ty: &TypeDecl, iface: &TypeDecl) -> bool {
        iface.methods.iter().all(|wanted| {
            // Unexported method names are qualified by their package.
            if !is_exported(&wanted.name) && ty.package != iface.package {
                return false;
            }
            ty.methods
                .iter()
                .any(|m| m.name == wanted.name && m.signature == wanted.signature)
        })
    }
}
