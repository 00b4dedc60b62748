//! Scroll export for es-archive
//!
//! Drains every document matching a query out of a search store and writes
//! each document's `_source` as one line of a gzip NDJSON archive.
//!
//! The drain follows the store's scroll protocol: one initial search that
//! opens a cursor, then one follow-up fetch per page, each renewing the
//! cursor's keep-alive, until a page comes back empty. Any failure aborts the
//! drain; a cursor walk cannot be resumed safely, so nothing is retried.

mod export;
mod scroll;

pub use export::{export, parse_query, ExportSummary};
pub use scroll::{Page, Scroll, ScrollOptions};

/// Number of documents requested per page
pub const DEFAULT_PAGE_SIZE: usize = 1000;

#[cfg(test)]
mod testing;
