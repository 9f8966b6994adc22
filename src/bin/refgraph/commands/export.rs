//! `refgraph export` command

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};

use super::read_only_options;
use crate::cli::ExportArgs;
use refgraph::core::RefKind;
use refgraph::ops::{self, ExportOptions};

pub fn execute(args: ExportArgs) -> Result<()> {
    let kinds = args
        .kinds
        .iter()
        .map(|k| k.parse::<RefKind>())
        .collect::<Result<Vec<_>, _>>()?;

    let opts = read_only_options(args.paths, args.source)?;
    let result = ops::index(&opts)?;
    let export = ExportOptions { kinds };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let written = ops::export_refs(&result.graph, &export, &mut out)?;
    tracing::info!("wrote {} refs", written);

    Ok(())
}
