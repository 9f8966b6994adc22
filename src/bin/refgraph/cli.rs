//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// refgraph - Cross-package reference graph builder
#[derive(Parser)]
#[command(name = "refgraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the graph of the given programs and upload it to a store
    Index(IndexArgs),

    /// Write every reference as one JSON record per line
    Export(ExportArgs),

    /// Look things up in the graph
    Query(QueryArgs),

    /// Display the import tree of a package
    Tree(TreeArgs),
}

/// Where packages come from and how they are versioned.
#[derive(Args)]
pub struct SourceArgs {
    /// Resolver snapshot (JSON) describing the universe of packages
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Also load the external test packages of each entry
    #[arg(long)]
    pub include_tests: bool,

    /// Version every package with this constant instead of file mtimes
    #[arg(long, value_name = "N")]
    pub constant_version: Option<i64>,

    /// Corpus root positions are made relative to (repeatable)
    #[arg(long = "corpus", value_name = "DIR")]
    pub corpora: Vec<PathBuf>,
}

#[derive(Args)]
pub struct IndexArgs {
    /// Entry packages, by load-path
    #[arg(required = true)]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Store directory (overrides `[store] dir`)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Entry packages, by load-path
    #[arg(required = true)]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Only export refs of this kind (repeatable)
    #[arg(short, long = "kind", value_name = "KIND")]
    pub kinds: Vec<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Entry packages, by load-path (repeatable)
    #[arg(short, long = "entry", value_name = "PATH", required = true)]
    pub entries: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub query: QueryCommand,
}

#[derive(Subcommand)]
pub enum QueryCommand {
    /// List loaded packages
    Packages {
        /// Only packages at or below this load-path
        prefix: Option<String>,
    },

    /// List the files of a package
    Files {
        /// Package load-path
        path: String,
    },

    /// List the refs starting or ending in a file
    Annotations {
        /// Corpus-relative file name
        file: String,
    },

    /// List the types and interfaces implementing an interface
    Implementations {
        /// Package load-path
        path: String,

        /// Interface name
        ident: String,
    },

    /// List the call sites of a function
    Callers {
        /// Package load-path
        path: String,

        /// Function name
        ident: String,
    },
}

#[derive(Args)]
pub struct TreeArgs {
    /// Package to show the tree for
    pub path: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,
}
