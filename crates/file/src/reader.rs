//! Archive reader

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::io::{BufRead, BufReader, Read};

/// Reads lines from a gzip-compressed NDJSON archive.
///
/// Concatenated gzip members are read as one stream. Trailing `\r\n` or `\n`
/// is stripped from every line.
pub struct ArchiveReader<R: Read> {
    inner: BufReader<MultiGzDecoder<R>>,
    max_line_bytes: usize,
    buf: Vec<u8>,
    line_number: u64,
}

impl<R: Read> ArchiveReader<R> {
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner: BufReader::new(MultiGzDecoder::new(inner)),
            max_line_bytes,
            buf: Vec::new(),
            line_number: 0,
        }
    }

    /// Read the next line, or `None` at end of input.
    ///
    /// Fails on decompression or I/O errors and on lines longer than the
    /// configured maximum; the reader should not be used after an error.
    pub fn next_line(&mut self) -> Result<Option<&[u8]>> {
        self.buf.clear();

        let next = self.line_number + 1;
        let limit = self.max_line_bytes as u64 + 1;
        let read = (&mut self.inner)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .with_context(|| format!("Failed to read line {next}"))?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        } else if self.buf.len() > self.max_line_bytes {
            anyhow::bail!(
                "Line {next} exceeds the maximum line length of {} bytes",
                self.max_line_bytes
            );
        }

        self.line_number += 1;
        Ok(Some(&self.buf))
    }

    /// Number of lines returned so far.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}
