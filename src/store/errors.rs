//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Most failures listed in an upload error.
pub const MAX_REPORTED: usize = 20;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document in `{}`", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} of {total} documents failed to upload:\n{}", failures.len(), format_failures(failures))]
    Upload {
        total: usize,
        failures: Vec<String>,
    },
}

fn format_failures(failures: &[String]) -> String {
    let mut lines: Vec<String> = failures
        .iter()
        .take(MAX_REPORTED)
        .map(|f| format!("  {}", f))
        .collect();
    if failures.len() > MAX_REPORTED {
        lines.push(format!("  ... and {} more", failures.len() - MAX_REPORTED));
    }
    lines.join("\n")
}
