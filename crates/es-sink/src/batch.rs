//! Bulk request batching

use serde::Serialize;
use serde_json::{Map, Value};

/// Destination of an import, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTarget {
    pub index: String,
    pub doc_type: String,
}

impl IndexTarget {
    pub fn new(index: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
        }
    }
}

/// Operation header preceding each document in a bulk body.
#[derive(Debug, Serialize)]
pub struct BulkAction<'a> {
    index: BulkActionMeta<'a>,
}

#[derive(Debug, Serialize)]
struct BulkActionMeta<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_type")]
    doc_type: &'a str,
    #[serde(rename = "_id", skip_serializing_if = "is_auto_id")]
    id: &'a str,
}

fn is_auto_id(id: &&str) -> bool {
    id.is_empty()
}

impl<'a> BulkAction<'a> {
    pub fn index(target: &'a IndexTarget, id: &'a str) -> Self {
        Self {
            index: BulkActionMeta {
                index: &target.index,
                doc_type: &target.doc_type,
                id,
            },
        }
    }
}

/// Documents queued for one bulk request, already encoded as NDJSON.
#[derive(Debug)]
pub struct BulkBatch {
    body: Vec<u8>,
    len: usize,
    capacity: usize,
}

impl BulkBatch {
    pub fn new(capacity: usize) -> Self {
        Self {
            body: Vec::new(),
            len: 0,
            capacity,
        }
    }

    /// Queue a document behind an index header.
    pub fn push(
        &mut self,
        target: &IndexTarget,
        id: &str,
        document: &Map<String, Value>,
    ) -> serde_json::Result<()> {
        serde_json::to_writer(&mut self.body, &BulkAction::index(target, id))?;
        self.body.push(b'\n');
        serde_json::to_writer(&mut self.body, document)?;
        self.body.push(b'\n');
        self.len += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    /// Hand out the encoded body and reset the batch.
    pub fn take_body(&mut self) -> Vec<u8> {
        self.len = 0;
        std::mem::take(&mut self.body)
    }
}
