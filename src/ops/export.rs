//! Implementation of `refgraph export`.

use std::io::Write;

use anyhow::{Context, Result};

use crate::core::RefKind;
use crate::graph::PackageGraph;

/// Options for exporting refs.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Only export these kinds (empty = all)
    pub kinds: Vec<RefKind>,
}

/// Write every ref of `graph` as one JSON record per line, grouped by
/// the package the ref comes from. Returns the number of records written.
pub fn export_refs(graph: &PackageGraph, opts: &ExportOptions, out: &mut dyn Write) -> Result<usize> {
    let mut written = 0;
    for pkg in graph.sorted_packages() {
        for r in pkg.out_refs() {
            if !opts.kinds.is_empty() && !opts.kinds.contains(&r.kind) {
                continue;
            }
            let record = r.to_record(pkg.version());
            serde_json::to_writer(&mut *out, &record).context("failed to serialize ref")?;
            out.write_all(b"\n").context("failed to write ref")?;
            written += 1;
        }
    }
    out.flush().context("failed to flush output")?;
    tracing::debug!("exported {} refs", written);
    Ok(written)
}
