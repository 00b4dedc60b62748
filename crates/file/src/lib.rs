//! Archive file handling for es-archive
//!
//! An archive is a gzip stream of newline-delimited JSON documents: one
//! document per line, no header, no footer. This crate provides the codec
//! ([`ArchiveWriter`], [`ArchiveReader`]) and a small source abstraction for
//! opening an archive from the local filesystem or over HTTP/HTTPS.
//!
//! # Example
//!
//! ```ignore
//! use es_archive_file::{ArchiveReader, ArchiveSource, DEFAULT_MAX_LINE_BYTES};
//!
//! let source = ArchiveSource::parse("./output.json.gz");
//! let mut reader = ArchiveReader::new(source.open().await?, DEFAULT_MAX_LINE_BYTES);
//! while let Some(line) = reader.next_line()? {
//!     // Process line...
//! }
//! ```

mod http;
mod local;
mod reader;
mod writer;

use anyhow::Result;
use std::path::PathBuf;

pub use flate2::Compression;
pub use http::HttpFileReader;
pub use local::LocalFileReader;
pub use reader::ArchiveReader;
pub use writer::ArchiveWriter;

/// Maximum length of a single archive line (10MB)
pub const DEFAULT_MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

/// Location of an archive to read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveSource {
    /// Local filesystem path
    Local(PathBuf),
    /// HTTP/HTTPS URL
    Http(String),
}

impl ArchiveSource {
    /// Parse a string into an ArchiveSource, auto-detecting the source type
    ///
    /// - `http://` or `https://` -> Http
    /// - Everything else -> Local
    pub fn parse(uri: &str) -> Self {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            ArchiveSource::Http(uri.to_string())
        } else {
            ArchiveSource::Local(PathBuf::from(uri))
        }
    }

    /// Open the archive and return a reader over its compressed bytes
    pub async fn open(&self) -> Result<Box<dyn std::io::Read + Send>> {
        match self {
            ArchiveSource::Local(path) => LocalFileReader::open(path.clone()).await,
            ArchiveSource::Http(url) => HttpFileReader::open(url.clone()).await,
        }
    }

    /// Get a display name for logging
    pub fn display_name(&self) -> String {
        match self {
            ArchiveSource::Local(path) => path.display().to_string(),
            ArchiveSource::Http(url) => url.clone(),
        }
    }
}
