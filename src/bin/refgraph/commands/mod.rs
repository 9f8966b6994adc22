//! Command implementations

pub mod export;
pub mod index;
pub mod query;
pub mod tree;

use anyhow::{Context, Result};

use crate::cli::SourceArgs;
use refgraph::core::Corpus;
use refgraph::ops::IndexOptions;
use refgraph::util::config::{
    global_config_path, load_config, project_config_path, Config, VersionKind,
};

/// Load the merged global and project configuration.
fn config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let global = global_config_path().unwrap_or_default();
    Ok(load_config(&global, &project_config_path(&cwd)))
}

/// Index options from the configuration, with command-line overrides.
fn index_options(load_paths: Vec<String>, source: SourceArgs) -> Result<IndexOptions> {
    let config = config()?;
    let mut opts = IndexOptions::from_config(&config, load_paths, source.snapshot)?;

    if source.include_tests {
        opts.include_tests = true;
    }
    if let Some(version) = source.constant_version {
        opts.version = VersionKind::Constant;
        opts.constant_version = version;
    }
    if !source.corpora.is_empty() {
        opts.corpora = source
            .corpora
            .into_iter()
            .map(|root| {
                Corpus::new(root.clone())
                    .with_context(|| format!("invalid corpus root `{}`", root.display()))
            })
            .collect::<Result<_>>()?;
    }

    Ok(opts)
}

/// Options for commands that only read the graph: nothing is uploaded.
fn read_only_options(load_paths: Vec<String>, source: SourceArgs) -> Result<IndexOptions> {
    let mut opts = index_options(load_paths, source)?;
    opts.store_dir = None;
    Ok(opts)
}
