//! `refgraph query` command

use std::sync::Arc;

use anyhow::Result;

use super::read_only_options;
use crate::cli::{QueryArgs, QueryCommand};
use refgraph::core::Ref;
use refgraph::ops::{self, query};

pub fn execute(args: QueryArgs) -> Result<()> {
    let opts = read_only_options(args.entries, args.source)?;
    let result = ops::index(&opts)?;
    let graph = &result.graph;

    match args.query {
        QueryCommand::Packages { prefix } => {
            for pkg in query::packages(graph, prefix.as_deref()) {
                println!("{} ({}) v{}", pkg.path(), pkg.name(), pkg.version());
            }
        }
        QueryCommand::Files { path } => {
            for file in query::files(graph, &path)? {
                println!("{}", file);
            }
        }
        QueryCommand::Annotations { file } => {
            for r in query::annotations(graph, &file) {
                println!("{}", r);
            }
        }
        QueryCommand::Implementations { path, ident } => {
            print_incoming(&query::implementations(graph, &path, &ident)?);
        }
        QueryCommand::Callers { path, ident } => {
            print_incoming(&query::callers(graph, &path, &ident)?);
        }
    }

    Ok(())
}

fn print_incoming(refs: &[Arc<Ref>]) {
    for r in refs {
        println!(
            "{:<14} {}.{}  {}",
            r.kind.to_string(),
            r.from_package,
            r.from_ident,
            r.from_position
        );
    }
}
