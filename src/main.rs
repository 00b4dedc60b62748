//! Command-line interface for es-archive
//!
//! # Usage Examples
//!
//! ## Export
//! ```bash
//! # Every document of the default index into ./output.json.gz
//! es-archive export --host http://localhost:9200
//!
//! # Documents matching a query, with a longer cursor keep-alive
//! es-archive export \
//!   --index logs-2024 \
//!   --query '{"range":{"@timestamp":{"gte":"now-1d"}}}' \
//!   --keep-alive 5m \
//!   --output logs.json.gz
//! ```
//!
//! ## Import
//! ```bash
//! # Replay an archive, letting the store assign ids
//! es-archive import --file logs.json.gz --index logs-restored --type _doc
//!
//! # Reuse the "uuid" field as document id, fail on any rejected batch
//! es-archive import --file logs.json.gz --index logs-restored --type _doc \
//!   --id-field uuid --strict
//! ```
//!
//! Set `RUST_LOG=debug` for per-page and per-batch progress.

use clap::{Parser, Subcommand};
use es_archive::{cmd, ExportArgs, ImportArgs};

#[derive(Parser)]
#[command(name = "es-archive")]
#[command(about = "Export search index documents to a gzip NDJSON archive and import them back")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query an index with the scroll API and write the source of each result
    /// on its own line of a gzipped file
    Export(ExportArgs),

    /// Import a gzipped file previously written by `export`
    Import(ImportArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export(args) => cmd::export::run(args).await,
        Commands::Import(args) => cmd::import::run(args).await,
    }
}
