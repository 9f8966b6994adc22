//! Document stores for incremental indexing.
//!
//! A store keeps one document per package version, keyed by
//! `Package::document_id`, plus file memberships and refs. Uploading a
//! graph skips package versions the store already has, and the same
//! check wired as a `PackageFilter` keeps the graph from populating them
//! in the first place.

pub mod dir;
pub mod errors;

pub use dir::DirStore;
pub use errors::StoreError;

use tracing::info;

use crate::core::{FileRecord, PackageRecord, RefRecord};
use crate::graph::{PackageFilter, PackageGraph};

/// A sink for indexed documents.
pub trait DocumentStore {
    /// Whether `load_path` at `version` is already stored.
    fn package_exists(&self, load_path: &str, version: i64) -> bool;

    fn put_package(&self, record: &PackageRecord) -> Result<(), StoreError>;

    fn put_file(&self, record: &FileRecord) -> Result<(), StoreError>;

    fn put_ref(&self, record: &RefRecord) -> Result<(), StoreError>;
}

/// Loads a package only if the store does not have it yet.
#[derive(Debug, Clone)]
pub struct StoreFilter<S> {
    store: S,
}

impl<S: DocumentStore> StoreFilter<S> {
    pub fn new(store: S) -> Self {
        StoreFilter { store }
    }
}

impl<S: DocumentStore> PackageFilter for StoreFilter<S> {
    fn accept(&self, load_path: &str, version: i64) -> bool {
        !self.store.package_exists(load_path, version)
    }
}

/// Counts from one upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadStats {
    pub packages: usize,
    pub skipped: usize,
    pub files: usize,
    pub refs: usize,
}

/// Upload every package of `graph` not yet in `store`, with its files and
/// out-refs.
///
/// A package document is written last, and only once all of its files
/// and refs are stored, so a package missing from the store is retried
/// in full on the next run. Failing documents do not stop the upload;
/// they are reported together once everything else has been written.
pub fn load_graph(graph: &PackageGraph, store: &dyn DocumentStore) -> Result<UploadStats, StoreError> {
    let mut stats = UploadStats::default();
    let mut failures = Vec::new();
    let mut total = 0;

    for pkg in graph.sorted_packages() {
        if store.package_exists(pkg.path().as_str(), pkg.version()) {
            stats.skipped += 1;
            continue;
        }

        let failed_before = failures.len();

        for file in pkg.file_records() {
            total += 1;
            match store.put_file(&file) {
                Ok(()) => stats.files += 1,
                Err(e) => failures.push(format!("file {}: {}", file.filename, e)),
            }
        }

        for r in pkg.out_refs() {
            total += 1;
            match store.put_ref(&r.to_record(pkg.version())) {
                Ok(()) => stats.refs += 1,
                Err(e) => failures.push(format!("ref {}: {}", r, e)),
            }
        }

        total += 1;
        let failed = failures.len() - failed_before;
        if failed > 0 {
            failures.push(format!(
                "package {}: not stored, {} of its documents failed",
                pkg.document_id(),
                failed
            ));
            continue;
        }
        match store.put_package(&pkg.to_record()) {
            Ok(()) => stats.packages += 1,
            Err(e) => failures.push(format!("package {}: {}", pkg.document_id(), e)),
        }
    }

    info!(
        "uploaded {} packages, {} files, {} refs ({} packages already present)",
        stats.packages, stats.files, stats.refs, stats.skipped
    );

    if failures.is_empty() {
        Ok(stats)
    } else {
        Err(StoreError::Upload { total, failures })
    }
}
