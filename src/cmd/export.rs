//! Export handler.
//!
//! Pipeline crate: crates/es-source/
//! CLI command: `export --host ... --index ... --output ... --query ...`

use crate::config::parse_keep_alive;
use crate::connect::connect;
use crate::ExportArgs;
use es_archive_file::{ArchiveWriter, Compression};
use es_archive_source::{export, parse_query, ScrollOptions};

pub async fn run(args: ExportArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.page_size > 0, "Page size must be greater than zero");
    let keep_alive = parse_keep_alive(&args.keep_alive)?;
    let query = parse_query(&args.query)?;

    let store = connect(&args.store).await?;

    let writer = ArchiveWriter::create(&args.output, Compression::new(args.compression_level))?;
    let opts = ScrollOptions {
        index: args.index,
        page_size: args.page_size,
        keep_alive,
    };
    let summary = export(&store, query, writer, &opts).await?;

    tracing::info!(
        "Wrote {} documents to {}",
        summary.documents,
        args.output.display()
    );
    if let Some(total) = summary.total_hits {
        if total != summary.documents {
            tracing::warn!(
                "Store reported {total} matching documents but {} were exported",
                summary.documents
            );
        }
    }
    Ok(())
}
