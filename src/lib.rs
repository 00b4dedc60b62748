//! es-archive library
//!
//! Moves documents between an Elasticsearch-compatible search store and a
//! gzip-compressed NDJSON archive, in both directions.
//!
//! # Pipelines
//!
//! - Export: drains every document matching a query with the scroll API and
//!   writes each `_source` as one archive line (`es_archive_source`).
//! - Import: replays an archive as bulk index requests of up to 1000
//!   documents each (`es_archive_sink`).
//!
//! The two pipelines share no state; they agree only on the archive format
//! (`es_archive_file`) and talk to the store through `es_client`.
//!
//! # CLI Usage
//!
//! ```bash
//! # Export every document of an index
//! es-archive export --host http://localhost:9200 --index documents --output ./output.json.gz
//!
//! # Export the documents matching a query
//! es-archive export --index logs --query '{"term":{"level":"error"}}' --output errors.json.gz
//!
//! # Import an archive into another index
//! es-archive import --file ./output.json.gz --index restored --type _doc
//! ```

use clap::Args;
use std::path::PathBuf;

pub mod cmd;
pub mod config;
pub mod connect;

pub use es_archive_file as file;
pub use es_archive_sink as sink;
pub use es_archive_source as source;
pub use es_client as client;

#[derive(Args, Clone, Debug)]
pub struct StoreOpts {
    /// Fully qualified store host and port
    #[arg(long, default_value = "http://localhost:9200", env = "ES_HOST")]
    pub host: String,
}

/// Arguments of `es-archive export`
#[derive(Args, Clone, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub store: StoreOpts,

    /// The index (or alias) name to run the query against
    #[arg(long, default_value = "documents")]
    pub index: String,

    /// Output file to store results to
    #[arg(long, default_value = "./output.json.gz")]
    pub output: PathBuf,

    /// Search query JSON; empty matches every document
    #[arg(long, default_value = "")]
    pub query: String,

    /// Documents fetched per scroll page
    #[arg(long, default_value = "1000")]
    pub page_size: usize,

    /// Scroll cursor keep-alive, renewed on every fetch (e.g. "1m", "90s")
    #[arg(long, default_value = "1m")]
    pub keep_alive: String,

    /// Gzip compression level of the archive (0-9)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(0..=9))]
    pub compression_level: u32,
}

/// Arguments of `es-archive import`
#[derive(Args, Clone, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub store: StoreOpts,

    /// Archive to import: a local path or an http(s) URL
    #[arg(long)]
    pub file: String,

    /// The name of the index documents will be created in
    #[arg(long)]
    pub index: String,

    /// The type to give to new documents when indexing them
    #[arg(long = "type")]
    pub doc_type: String,

    /// Documents per bulk request
    #[arg(long, default_value = "1000")]
    pub batch_size: usize,

    /// Take document ids from this top-level field instead of letting the store assign them
    #[arg(long)]
    pub id_field: Option<String>,

    /// Longest archive line accepted, in bytes
    #[arg(long, default_value = "10485760")]
    pub max_line_bytes: usize,

    /// Exit with an error when any batch or item failed or the archive could not be read to the end
    #[arg(long)]
    pub strict: bool,
}
