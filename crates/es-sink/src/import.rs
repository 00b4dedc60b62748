//! Import loop

use crate::batch::{BulkBatch, IndexTarget};
use crate::hooks::DocumentHooks;
use crate::DEFAULT_BATCH_SIZE;
use anyhow::{Context, Result};
use es_archive_file::{ArchiveReader, ArchiveSource, DEFAULT_MAX_LINE_BYTES};
use es_client::SearchStore;
use serde_json::{Map, Value};
use std::io::Read;

/// Configuration for an import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Documents per bulk request
    pub batch_size: usize,

    /// Longest archive line accepted before reading stops
    pub max_line_bytes: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// Counters of an import run.
///
/// Per-document and per-batch failures end up here instead of failing the
/// run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Lines read, including empty and malformed ones
    pub lines: u64,
    /// Documents queued for import
    pub documents: u64,
    /// Lines that did not parse as a JSON object
    pub malformed: u64,
    /// Bulk requests issued, including a final empty one
    pub batches: usize,
    /// Bulk requests that failed or were rejected
    pub failed_batches: usize,
    /// Items the store reported as failed inside accepted bulk requests
    pub failed_items: usize,
    /// Error that stopped reading the archive early
    pub read_error: Option<String>,
}

impl ImportSummary {
    /// No batch failed, no item was rejected and the whole archive was read.
    pub fn is_clean(&self) -> bool {
        self.failed_batches == 0 && self.failed_items == 0 && self.read_error.is_none()
    }
}

/// Open `source` and import it.
///
/// Failing to open the archive is fatal; everything after that follows
/// [`import`].
pub async fn import_source<S, H>(
    store: &S,
    source: &ArchiveSource,
    target: &IndexTarget,
    hooks: &H,
    opts: &ImportOptions,
) -> Result<ImportSummary>
where
    S: SearchStore + ?Sized,
    H: DocumentHooks + ?Sized,
{
    let name = source.display_name();
    let input = source
        .open()
        .await
        .with_context(|| format!("Unable to read file {name}"))?;
    tracing::info!("Importing {name} into {}/{}", target.index, target.doc_type);

    import(
        store,
        ArchiveReader::new(input, opts.max_line_bytes),
        target,
        hooks,
        opts,
    )
    .await
}

/// Replay archive lines into the store as bulk index requests.
///
/// Empty lines are skipped silently, malformed lines are logged and skipped,
/// and every full batch is flushed as it fills. Whatever remains at the end
/// of input is flushed as a final batch, even when it is empty. A failed
/// flush is logged and counted, then the run moves on to the next batch.
pub async fn import<S, R, H>(
    store: &S,
    mut reader: ArchiveReader<R>,
    target: &IndexTarget,
    hooks: &H,
    opts: &ImportOptions,
) -> Result<ImportSummary>
where
    S: SearchStore + ?Sized,
    R: Read,
    H: DocumentHooks + ?Sized,
{
    let mut summary = ImportSummary::default();
    let mut batch = BulkBatch::new(opts.batch_size.max(1));

    loop {
        // Blocking read and gunzip on the runtime thread; the loop is strictly
        // sequential, so no other task waits on this worker.
        let line = match reader.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Stopped reading archive: {e:#}");
                summary.read_error = Some(format!("{e:#}"));
                break;
            }
        };
        summary.lines += 1;

        if line.is_empty() {
            continue;
        }

        let mut document: Map<String, Value> = match serde_json::from_slice(line) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed document at line {}: {e}\n{}",
                    summary.lines,
                    String::from_utf8_lossy(line)
                );
                summary.malformed += 1;
                continue;
            }
        };

        hooks.transform(&mut document);
        let raw_line = std::str::from_utf8(line).unwrap_or_default();
        let id = hooks.document_id(&document, raw_line);

        batch
            .push(target, &id, &document)
            .with_context(|| format!("Failed to encode document at line {}", summary.lines))?;
        summary.documents += 1;

        if batch.is_full() {
            flush(store, &mut batch, &mut summary).await;
        }
    }

    flush(store, &mut batch, &mut summary).await;

    tracing::info!(
        "Processed {} lines: {} documents in {} batches ({} malformed, {} failed batches, {} failed items)",
        summary.lines,
        summary.documents,
        summary.batches,
        summary.malformed,
        summary.failed_batches,
        summary.failed_items
    );

    Ok(summary)
}

async fn flush<S>(store: &S, batch: &mut BulkBatch, summary: &mut ImportSummary)
where
    S: SearchStore + ?Sized,
{
    let size = batch.len();
    let body = batch.take_body();
    summary.batches += 1;

    match store.bulk(body).await {
        Ok(response) => {
            tracing::info!(
                "Bulk request {} with {size} documents: status {}",
                summary.batches,
                response.status
            );
            if response.errors {
                tracing::warn!(
                    "Bulk request {} reported {} failed items",
                    summary.batches,
                    response.failed_items
                );
                summary.failed_items += response.failed_items;
            }
        }
        Err(e) => {
            tracing::warn!(
                "Bulk request {} with {size} documents failed: {e}",
                summary.batches
            );
            summary.failed_batches += 1;
        }
    }
}
