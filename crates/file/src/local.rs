//! Local filesystem archive reader

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Opens a local archive file
pub struct LocalFileReader;

impl LocalFileReader {
    /// Open a local file and return a sync-compatible reader
    ///
    /// The file is streamed, not buffered in memory; wrap the result in an
    /// [`crate::ArchiveReader`] to decompress and split it into lines.
    pub async fn open(path: PathBuf) -> Result<Box<dyn std::io::Read + Send>> {
        let file = tokio::fs::File::open(&path)
            .await
            .with_context(|| format!("Unable to open file {}", path.display()))?;
        let file = file.into_std().await;

        tracing::debug!("Opened archive file: {}", path.display());

        Ok(Box::new(file))
    }
}
