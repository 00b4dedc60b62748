//! Recording in-memory store for import tests.

use es_client::{
    BulkResponse, KeepAlive, PingResponse, ScrollId, ScrollResponse, SearchRequest, SearchStore,
    StoreError,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::sync::Mutex;

/// Gzip `lines`, each terminated by a newline.
pub(crate) fn gzip_lines(lines: &[String]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    for line in lines {
        encoder.write_all(line.as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
    }
    encoder.finish().unwrap()
}

/// Records every bulk body it receives.
pub(crate) struct RecordingStore {
    bodies: Mutex<Vec<String>>,
    reject_batch: Option<usize>,
    failed_items_per_batch: usize,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            bodies: Mutex::new(Vec::new()),
            reject_batch: None,
            failed_items_per_batch: 0,
        }
    }

    /// Answer bulk request `batch` (0-based) with HTTP 429.
    pub(crate) fn reject_batch(mut self, batch: usize) -> Self {
        self.reject_batch = Some(batch);
        self
    }

    /// Report `count` failed items in every accepted bulk request.
    pub(crate) fn failed_items_per_batch(mut self, count: usize) -> Self {
        self.failed_items_per_batch = count;
        self
    }

    pub(crate) fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    /// Number of documents in each received body.
    pub(crate) fn batch_sizes(&self) -> Vec<usize> {
        self.bodies()
            .iter()
            .map(|body| body.lines().count() / 2)
            .collect()
    }

    /// Operation header lines across all bodies, in order.
    pub(crate) fn headers(&self) -> Vec<String> {
        self.lines_at(0)
    }

    /// Document lines across all bodies, in order.
    pub(crate) fn documents(&self) -> Vec<String> {
        self.lines_at(1)
    }

    fn lines_at(&self, offset: usize) -> Vec<String> {
        self.bodies()
            .iter()
            .flat_map(|body| {
                body.lines()
                    .skip(offset)
                    .step_by(2)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SearchStore for RecordingStore {
    async fn ping(&self) -> Result<PingResponse, StoreError> {
        Ok(PingResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }

    async fn open_scroll(
        &self,
        _index: &str,
        _request: &SearchRequest,
        _keep_alive: KeepAlive,
    ) -> Result<ScrollResponse, StoreError> {
        unimplemented!("import never scrolls")
    }

    async fn continue_scroll(
        &self,
        _scroll_id: &ScrollId,
        _keep_alive: KeepAlive,
    ) -> Result<ScrollResponse, StoreError> {
        unimplemented!("import never scrolls")
    }

    async fn bulk(&self, body: Vec<u8>) -> Result<BulkResponse, StoreError> {
        let batch = {
            let mut bodies = self.bodies.lock().unwrap();
            bodies.push(String::from_utf8(body).unwrap());
            bodies.len() - 1
        };

        if self.reject_batch == Some(batch) {
            return Err(StoreError::Status {
                url: "recording/_bulk".to_string(),
                status: 429,
                body: r#"{"error":"es_rejected_execution_exception"}"#.to_string(),
            });
        }

        Ok(BulkResponse {
            status: 200,
            took: Some(1),
            errors: self.failed_items_per_batch > 0,
            failed_items: self.failed_items_per_batch,
        })
    }
}
