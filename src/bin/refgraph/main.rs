//! refgraph CLI - Cross-package reference graph builder

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("refgraph=debug")
    } else {
        EnvFilter::new("refgraph=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Index(args) => commands::index::execute(args),
        Commands::Export(args) => commands::export::execute(args),
        Commands::Query(args) => commands::query::execute(args),
        Commands::Tree(args) => commands::tree::execute(args),
    }
}
