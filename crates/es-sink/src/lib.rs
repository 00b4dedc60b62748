//! Bulk import for es-archive
//!
//! Replays an archive into a search store. Lines are parsed into documents,
//! passed through [`DocumentHooks`], and accumulated into batches that are
//! flushed as one bulk request each.
//!
//! Failures are scoped to the smallest unit they affect: a malformed line
//! skips one document, a rejected bulk request drops one batch, and neither
//! stops the run. Both are counted in the returned [`ImportSummary`].

mod batch;
mod hooks;
mod import;

pub use batch::{BulkAction, BulkBatch, IndexTarget};
pub use hooks::{DocumentHooks, IdFieldHooks, NoopHooks};
pub use import::{import, import_source, ImportOptions, ImportSummary};

/// Documents per bulk request
pub const DEFAULT_BATCH_SIZE: usize = 1000;

#[cfg(test)]
mod testing;
