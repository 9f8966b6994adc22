//! Implementation of `refgraph index`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::core::Corpus;
use crate::graph::{ConstantVersion, FileMtimeVersion, PackageGraph};
use crate::resolver::SnapshotResolver;
use crate::store::{load_graph, DirStore, StoreFilter, UploadStats};
use crate::util::config::{Config, VersionKind};

/// Options for building a reference graph.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Entry packages
    pub load_paths: Vec<String>,

    /// Resolver snapshot to load packages from
    pub snapshot: PathBuf,

    /// Also load external test packages
    pub include_tests: bool,

    /// Versioning policy
    pub version: VersionKind,

    /// Version for the constant policy
    pub constant_version: i64,

    /// Corpora positions are relative to
    pub corpora: Vec<Corpus>,

    /// Store to upload to; packages already in it are not reloaded
    pub store_dir: Option<PathBuf>,
}

impl IndexOptions {
    /// Options with the defaults taken from `config`.
    pub fn from_config(config: &Config, load_paths: Vec<String>, snapshot: PathBuf) -> Result<Self> {
        Ok(IndexOptions {
            load_paths,
            snapshot,
            include_tests: config.index.include_tests,
            version: config.version_kind()?,
            constant_version: config.index.constant_version.unwrap_or(0),
            corpora: config.corpora()?,
            store_dir: config.store.dir.clone(),
        })
    }
}

/// Result of an index run.
#[derive(Debug)]
pub struct IndexResult {
    pub graph: PackageGraph,

    /// Implementation and Extension refs added by the matrix
    pub structural_refs: usize,

    /// Present when a store was configured
    pub upload: Option<UploadStats>,
}

/// Build the graph for `opts.load_paths`, compute the interface matrix and
/// upload to the store, if any.
pub fn index(opts: &IndexOptions) -> Result<IndexResult> {
    let start = Instant::now();

    let resolver = SnapshotResolver::load(&opts.snapshot)
        .with_context(|| format!("failed to load resolver snapshot: {}", opts.snapshot.display()))?;

    let mut graph = match opts.version {
        VersionKind::Mtime => PackageGraph::new(resolver, FileMtimeVersion),
        VersionKind::Constant => PackageGraph::new(resolver, ConstantVersion(opts.constant_version)),
    }
    .with_corpora(opts.corpora.iter().cloned());

    let store = match &opts.store_dir {
        Some(dir) => {
            let store = DirStore::open(dir)
                .with_context(|| format!("failed to open store: {}", dir.display()))?;
            graph.set_filter(StoreFilter::new(store.clone()));
            Some(store)
        }
        None => None,
    };

    graph
        .load_programs(opts.load_paths.as_slice(), opts.include_tests)
        .context("failed to load programs")?;

    let structural_refs = graph.compute_interface_implementation_matrix();

    let upload = match &store {
        Some(store) => Some(
            load_graph(&graph, store)
                .with_context(|| format!("failed to upload to {}", store.root().display()))?,
        ),
        None => None,
    };

    tracing::info!(
        "indexed {} packages with {} refs in {:.2}s",
        graph.len(),
        graph.refs().count(),
        start.elapsed().as_secs_f64()
    );

    Ok(IndexResult {
        graph,
        structural_refs,
        upload,
    })
}
