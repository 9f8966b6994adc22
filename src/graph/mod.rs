//! PackageGraph - the package reference graph.
//!
//! Packages live in an arena keyed by load-path. Refs name both of their
//! packages by load-path and are shared (`Arc`) between the out-refs of
//! one end and the in-refs of the other.

pub mod classify;
pub mod errors;
pub mod imports;
mod load;
mod matrix;
pub mod vendor;
pub mod version;

pub use classify::classify;
pub use errors::{GraphError, VersionError};
pub use imports::ImportGraph;
pub use vendor::{resolve_import, vendor_candidates};
pub use version::{ConstantVersion, FileMtimeVersion, FilterPass, PackageFilter, VersionPolicy};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::{Corpus, LoadPath, Package, Ref, RefRecord};
use crate::resolver::SymbolResolver;

/// Built-in packages with no backing files.
pub const PSEUDO_PACKAGES: &[&str] = &["unsafe"];

pub fn is_pseudo_package(load_path: &str) -> bool {
    PSEUDO_PACKAGES.contains(&load_path)
}

/// A graph of packages and the references between them.
pub struct PackageGraph {
    resolver: Box<dyn SymbolResolver>,
    version_policy: Box<dyn VersionPolicy>,
    filter: Box<dyn PackageFilter>,
    corpora: Vec<Corpus>,
    packages: HashMap<LoadPath, Package>,
}

impl PackageGraph {
    /// Create an empty graph. All packages pass the filter and no corpora
    /// are configured.
    pub fn new(
        resolver: impl SymbolResolver + 'static,
        version_policy: impl VersionPolicy + 'static,
    ) -> Self {
        PackageGraph {
            resolver: Box::new(resolver),
            version_policy: Box::new(version_policy),
            filter: Box::new(FilterPass),
            corpora: Vec::new(),
            packages: HashMap::new(),
        }
    }

    pub fn with_filter(mut self, filter: impl PackageFilter + 'static) -> Self {
        self.set_filter(filter);
        self
    }

    pub fn with_corpora(mut self, corpora: impl IntoIterator<Item = Corpus>) -> Self {
        self.corpora = corpora.into_iter().collect();
        self
    }

    /// Replace the filter for subsequent loads.
    pub fn set_filter(&mut self, filter: impl PackageFilter + 'static) {
        self.filter = Box::new(filter);
    }

    pub fn corpora(&self) -> &[Corpus] {
        &self.corpora
    }

    pub fn resolver(&self) -> &dyn SymbolResolver {
        self.resolver.as_ref()
    }

    pub fn package(&self, load_path: &str) -> Option<&Package> {
        self.packages.get(load_path)
    }

    pub fn contains(&self, load_path: &str) -> bool {
        self.packages.contains_key(load_path)
    }

    /// Packages in no particular order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Packages ordered by load-path.
    pub fn sorted_packages(&self) -> Vec<&Package> {
        let mut pkgs: Vec<_> = self.packages.values().collect();
        pkgs.sort_by_key(|p| p.path());
        pkgs
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Every ref of the graph, once each.
    pub fn refs(&self) -> impl Iterator<Item = &Arc<Ref>> {
        self.packages.values().flat_map(|p| p.in_refs())
    }

    /// Storage form of `r`, stamped with its from-package's version.
    pub fn record(&self, r: &Ref) -> RefRecord {
        let version = self
            .package(&r.from_package)
            .map(Package::version)
            .unwrap_or_default();
        r.to_record(version)
    }

    /// Corpus holding `file`, if any.
    pub(crate) fn corpus_for(&self, file: &Path) -> Option<Corpus> {
        self.corpora.iter().find(|c| c.contains(file)).cloned()
    }

    /// Record `r` on both of its packages. Refs to or from a package that
    /// is not in the graph are dropped.
    pub(crate) fn add_ref(&mut self, r: Ref) -> bool {
        if !self.contains(&r.from_package) || !self.contains(&r.to_package) {
            return false;
        }
        let r = Arc::new(r);
        if let Some(from) = self.packages.get_mut(&r.from_package) {
            from.out_refs.push(Arc::clone(&r));
        }
        if let Some(to) = self.packages.get_mut(&r.to_package) {
            to.in_refs.push(r);
        }
        true
    }
}

impl std::fmt::Debug for PackageGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageGraph")
            .field("corpora", &self.corpora)
            .field("packages", &self.packages.len())
            .finish()
    }
}
