//! Graph error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::resolver::ResolverError;

/// A version policy could not version a package.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("package `{0}` has no files to version")]
    NoFiles(String),

    #[error("failed to stat `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("modification time of `{}` is out of range", .0.display())]
    BeforeEpoch(PathBuf),
}

/// Error loading programs into a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to resolve program [{paths}]")]
    Resolve {
        paths: String,
        #[source]
        source: ResolverError,
    },
}
