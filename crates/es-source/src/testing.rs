//! Scripted in-memory store for scroll tests.

use es_client::{
    BulkResponse, KeepAlive, PingResponse, ScrollId, ScrollResponse, SearchRequest, SearchStore,
    StoreError,
};
use std::ops::Range;
use std::sync::Mutex;

/// Documents `{"n":start}` .. `{"n":end-1}`.
pub(crate) fn docs(range: Range<usize>) -> Vec<String> {
    range.map(|n| format!(r#"{{"n":{n}}}"#)).collect()
}

/// Serves one scripted page per fetch and records every request.
///
/// Fetch `i` answers with page `i` and cursor `cursor-{i+1}`; fetches past
/// the script answer with an empty page.
pub(crate) struct ScriptedStore {
    pages: Vec<Vec<String>>,
    fail_at: Option<(usize, u16)>,
    without_source_at: Option<usize>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedStore {
    pub(crate) fn new(pages: Vec<Vec<String>>) -> Self {
        Self {
            pages,
            fail_at: None,
            without_source_at: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer fetch `fetch` with HTTP `status` instead of a page.
    pub(crate) fn fail_at(mut self, fetch: usize, status: u16) -> Self {
        self.fail_at = Some((fetch, status));
        self
    }

    /// Drop `_source` from the hit at `position` of every page.
    pub(crate) fn without_source_at(mut self, position: usize) -> Self {
        self.without_source_at = Some(position);
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(&self, request: String) -> Result<ScrollResponse, StoreError> {
        let fetch = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len() - 1
        };

        if let Some((at, status)) = self.fail_at {
            if at == fetch {
                return Err(StoreError::Status {
                    url: "scripted".to_string(),
                    status,
                    body: r#"{"error":"search_context_missing_exception"}"#.to_string(),
                });
            }
        }

        let total: usize = self.pages.iter().map(Vec::len).sum();
        let page = self.pages.get(fetch).cloned().unwrap_or_default();
        let hits: Vec<String> = page
            .iter()
            .enumerate()
            .map(|(position, doc)| {
                if self.without_source_at == Some(position) {
                    format!(r#"{{"_id":"{fetch}-{position}"}}"#)
                } else {
                    format!(r#"{{"_id":"{fetch}-{position}","_source":{doc}}}"#)
                }
            })
            .collect();
        let body = format!(
            r#"{{"_scroll_id":"cursor-{}","hits":{{"total":{total},"hits":[{}]}}}}"#,
            fetch + 1,
            hits.join(",")
        );
        Ok(serde_json::from_str(&body).unwrap())
    }
}

#[async_trait::async_trait]
impl SearchStore for ScriptedStore {
    async fn ping(&self) -> Result<PingResponse, StoreError> {
        Ok(PingResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }

    async fn open_scroll(
        &self,
        index: &str,
        request: &SearchRequest,
        keep_alive: KeepAlive,
    ) -> Result<ScrollResponse, StoreError> {
        let body = serde_json::to_string(request)?;
        self.respond(format!("open {index} {keep_alive} {body}"))
    }

    async fn continue_scroll(
        &self,
        scroll_id: &ScrollId,
        keep_alive: KeepAlive,
    ) -> Result<ScrollResponse, StoreError> {
        self.respond(format!("continue {scroll_id} {keep_alive}"))
    }

    async fn bulk(&self, _body: Vec<u8>) -> Result<BulkResponse, StoreError> {
        Ok(BulkResponse::empty())
    }
}
