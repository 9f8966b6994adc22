//! `refgraph index` command

use anyhow::Result;

use super::index_options;
use crate::cli::IndexArgs;
use refgraph::ops;

pub fn execute(args: IndexArgs) -> Result<()> {
    let mut opts = index_options(args.paths, args.source)?;
    if args.store.is_some() {
        opts.store_dir = args.store;
    }

    let result = ops::index(&opts)?;

    println!(
        "{} packages, {} refs ({} structural)",
        result.graph.len(),
        result.graph.refs().count(),
        result.structural_refs
    );

    if let Some(upload) = result.upload {
        println!(
            "uploaded {} packages ({} already stored), {} files, {} refs",
            upload.packages, upload.skipped, upload.files, upload.refs
        );
    }

    Ok(())
}
