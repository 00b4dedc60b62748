//! Elasticsearch-compatible HTTP implementation of [`SearchStore`].

use crate::{
    BulkResponse, KeepAlive, PingResponse, ScrollId, ScrollRequest, ScrollResponse, SearchRequest,
    SearchStore, StoreError, NDJSON_CONTENT_TYPE,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Store client over HTTP+JSON.
///
/// Scroll and bulk requests carry no client-side timeout; the store's
/// keep-alive is the only clock on a scroll.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    host: String,
}

impl HttpStore {
    /// Create a client for `host`, e.g. `http://localhost:9200`.
    pub fn new(host: &str) -> Result<Self, StoreError> {
        let host = host.trim_end_matches('/').to_string();
        let client = Client::builder()
            .build()
            .map_err(|source| StoreError::Transport {
                url: host.clone(),
                source,
            })?;
        Ok(Self { client, host })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<(u16, String), StoreError> {
        let response = request.send().await.map_err(|source| StoreError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| StoreError::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok((status, body))
    }

    async fn post_scroll(&self, url: String, body: Vec<u8>) -> Result<ScrollResponse, StoreError> {
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let (status, body) = self.send(request, &url).await?;

        if !(200..300).contains(&status) {
            return Err(StoreError::Status { url, status, body });
        }

        serde_json::from_str(&body).map_err(|source| StoreError::Decode { url, source })
    }
}

#[async_trait::async_trait]
impl SearchStore for HttpStore {
    async fn ping(&self) -> Result<PingResponse, StoreError> {
        let request = self.client.get(&self.host).timeout(PING_TIMEOUT);
        let (status, body) = self.send(request, &self.host).await?;
        Ok(PingResponse { status, body })
    }

    async fn open_scroll(
        &self,
        index: &str,
        request: &SearchRequest,
        keep_alive: KeepAlive,
    ) -> Result<ScrollResponse, StoreError> {
        let url = format!("{}/{}/_search?scroll={}", self.host, index, keep_alive);
        let body = serde_json::to_vec(request)?;
        tracing::debug!("Opening scroll: {url}");
        self.post_scroll(url, body).await
    }

    async fn continue_scroll(
        &self,
        scroll_id: &ScrollId,
        keep_alive: KeepAlive,
    ) -> Result<ScrollResponse, StoreError> {
        let url = format!("{}/_search/scroll", self.host);
        let body = serde_json::to_vec(&ScrollRequest {
            scroll: keep_alive.to_string(),
            scroll_id: scroll_id.as_str(),
        })?;
        self.post_scroll(url, body).await
    }

    async fn bulk(&self, body: Vec<u8>) -> Result<BulkResponse, StoreError> {
        if body.is_empty() {
            tracing::debug!("Skipping bulk request with empty body");
            return Ok(BulkResponse::empty());
        }

        let url = format!("{}/_bulk", self.host);
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, NDJSON_CONTENT_TYPE)
            .body(body);
        let (status, body) = self.send(request, &url).await?;

        if !(200..300).contains(&status) {
            return Err(StoreError::Status { url, status, body });
        }

        Ok(BulkResponse::from_body(status, &body))
    }
}
