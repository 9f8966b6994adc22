//! `refgraph tree` command

use anyhow::Result;

use super::read_only_options;
use crate::cli::TreeArgs;
use refgraph::ops;

pub fn execute(args: TreeArgs) -> Result<()> {
    let opts = read_only_options(vec![args.path.clone()], args.source)?;
    let result = ops::index(&opts)?;

    let imports = result.graph.import_graph();
    if !imports.contains(&args.path) {
        anyhow::bail!(
            "package `{}` was not loaded\n\
             help: Run with --verbose to see why packages are skipped",
            args.path
        );
    }

    print!("{}", imports.render_tree(&args.path, args.depth));

    Ok(())
}
