//! Resolver error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error producing a resolved program.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("package not found: `{load_path}`")]
    PackageNotFound { load_path: String },

    #[error("no entry packages requested")]
    NoEntries,

    #[error("failed to read snapshot `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
