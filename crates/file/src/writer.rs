//! Archive writer

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::value::RawValue;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes documents to a gzip-compressed NDJSON archive, one per line.
///
/// Dropping the writer finishes the gzip stream on a best-effort basis, so an
/// archive abandoned on an error path is still readable up to the last line
/// written. Call [`ArchiveWriter::finish`] on the success path to observe
/// flush errors.
pub struct ArchiveWriter<W: Write> {
    encoder: GzEncoder<W>,
    lines: u64,
}

impl ArchiveWriter<BufWriter<File>> {
    /// Create (or truncate) an archive file at `path`.
    pub fn create<P: AsRef<Path>>(path: P, level: Compression) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Unable to create output file {}", path.display()))?;
        tracing::debug!("Created archive file: {}", path.display());
        Ok(Self::new(BufWriter::new(file), level))
    }
}

impl<W: Write> ArchiveWriter<W> {
    pub fn new(inner: W, level: Compression) -> Self {
        Self {
            encoder: GzEncoder::new(inner, level),
            lines: 0,
        }
    }

    /// Append one document.
    ///
    /// The raw text is copied byte for byte, except that line breaks are
    /// dropped so a pretty-printed document still takes a single line. A raw
    /// `\n` or `\r` in valid JSON can only be whitespace between tokens, so
    /// every value, number formatting included, is kept as received.
    pub fn write_document(&mut self, document: &RawValue) -> Result<()> {
        let text = document.get().as_bytes();
        if text.contains(&b'\n') || text.contains(&b'\r') {
            for chunk in text.split(|b| *b == b'\n' || *b == b'\r') {
                self.encoder
                    .write_all(chunk)
                    .context("Failed to write document to archive")?;
            }
        } else {
            self.encoder
                .write_all(text)
                .context("Failed to write document to archive")?;
        }
        self.encoder
            .write_all(b"\n")
            .context("Failed to write document to archive")?;
        self.lines += 1;
        Ok(())
    }

    /// Number of documents written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Write the gzip trailer, flush, and return the inner writer.
    pub fn finish(self) -> Result<W> {
        let mut inner = self
            .encoder
            .finish()
            .context("Failed to finish gzip stream")?;
        inner.flush().context("Failed to flush archive")?;
        Ok(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::MultiGzDecoder;
    use std::io::Read;

    fn decompress(bytes: &[u8]) -> String {
        let mut out = String::new();
        MultiGzDecoder::new(bytes).read_to_string(&mut out).unwrap();
        out
    }

    fn raw(text: &str) -> Box<RawValue> {
        RawValue::from_string(text.to_string()).unwrap()
    }

    #[test]
    fn test_write_documents_verbatim() {
        let mut writer = ArchiveWriter::new(Vec::new(), Compression::fast());
        writer.write_document(&raw(r#"{"b":1,  "a":"x"}"#)).unwrap();
        writer.write_document(&raw(r#"{"text":"line\nbreak"}"#)).unwrap();
        assert_eq!(writer.lines(), 2);

        let bytes = writer.finish().unwrap();
        assert_eq!(
            decompress(&bytes),
            "{\"b\":1,  \"a\":\"x\"}\n{\"text\":\"line\\nbreak\"}\n"
        );
    }

    #[test]
    fn test_multi_line_document_is_joined() {
        let mut writer = ArchiveWriter::new(Vec::new(), Compression::fast());
        writer
            .write_document(&raw("{\r\n  \"name\": \"pretty\",\r\n  \"n\": 2\r\n}"))
            .unwrap();

        let bytes = writer.finish().unwrap();
        assert_eq!(decompress(&bytes), "{  \"name\": \"pretty\",  \"n\": 2}\n");
    }

    #[test]
    fn test_multi_line_document_keeps_number_text() {
        let mut writer = ArchiveWriter::new(Vec::new(), Compression::fast());
        writer
            .write_document(&raw(
                "{\n \"price\": 1.50,\n \"big\": 123456789012345678901234567890,\n \"e\": 1e2,\n \"s\": \"a\\nb\"\n}",
            ))
            .unwrap();

        let bytes = writer.finish().unwrap();
        assert_eq!(
            decompress(&bytes),
            "{ \"price\": 1.50, \"big\": 123456789012345678901234567890, \"e\": 1e2, \"s\": \"a\\nb\"}\n"
        );
    }

    #[test]
    fn test_empty_archive_is_valid_gzip() {
        let writer = ArchiveWriter::new(Vec::new(), Compression::fast());
        let bytes = writer.finish().unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(decompress(&bytes), "");
    }

    #[test]
    fn test_create_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json.gz");

        let mut writer = ArchiveWriter::create(&path, Compression::best()).unwrap();
        writer.write_document(&raw(r#"{"id":1}"#)).unwrap();
        writer.finish().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(decompress(&bytes), "{\"id\":1}\n");
    }

    #[test]
    fn test_dropped_writer_still_finishes_stream() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.json.gz");

        {
            let mut writer = ArchiveWriter::create(&path, Compression::fast()).unwrap();
            writer.write_document(&raw(r#"{"id":1}"#)).unwrap();
        }

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(decompress(&bytes), "{\"id\":1}\n");
    }
}
