//! Export loop

use crate::scroll::{Scroll, ScrollOptions};
use anyhow::{Context, Result};
use es_archive_file::ArchiveWriter;
use es_client::SearchStore;
use serde_json::value::RawValue;
use std::io::Write;

/// Counters of a completed export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Scroll requests issued, including the terminating empty fetch
    pub fetches: usize,
    /// Non-empty pages received
    pub pages: usize,
    /// Documents written to the archive
    pub documents: u64,
    /// Hits skipped because they carried no `_source`
    pub missing_source: usize,
    /// `hits.total` reported by the store
    pub total_hits: Option<u64>,
}

/// Parse the caller's query string.
///
/// An empty or blank string means no query; anything else must be valid JSON
/// and is kept verbatim.
pub fn parse_query(query: &str) -> Result<Option<Box<RawValue>>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }
    let raw = serde_json::from_str::<Box<RawValue>>(query).context("Query is not valid JSON")?;
    Ok(Some(raw))
}

/// Drain every document matching `query` into `writer`.
///
/// The writer is owned by the export: it is finished on success and dropped
/// (which still closes the gzip stream) when the drain fails. Documents
/// written before a failure stay in the archive.
pub async fn export<S, W>(
    store: &S,
    query: Option<Box<RawValue>>,
    mut writer: ArchiveWriter<W>,
    opts: &ScrollOptions,
) -> Result<ExportSummary>
where
    S: SearchStore + ?Sized,
    W: Write,
{
    tracing::info!(
        "Starting export from index '{}' (page size {}, keep-alive {})",
        opts.index,
        opts.page_size,
        opts.keep_alive
    );

    let mut scroll = Scroll::new(store, query, opts);
    let mut summary = ExportSummary::default();

    while let Some(page) = scroll.next_page().await? {
        for document in &page.documents {
            writer.write_document(document)?;
        }
        summary.pages += 1;
        summary.documents += page.documents.len() as u64;
        summary.missing_source += page.missing_source;

        tracing::debug!(
            "Wrote page {} with {} documents ({} total)",
            summary.pages,
            page.documents.len(),
            summary.documents
        );
    }

    writer.finish().context("Failed to close output archive")?;

    summary.fetches = scroll.fetches();
    summary.total_hits = scroll.total_hits();

    tracing::info!(
        "Export completed: {} documents in {} pages ({} fetches)",
        summary.documents,
        summary.pages,
        summary.fetches
    );
    if summary.missing_source > 0 {
        tracing::warn!(
            "{} hits had no _source and were not exported",
            summary.missing_source
        );
    }

    Ok(summary)
}
