//! SearchStore trait definition.

use crate::{
    BulkResponse, KeepAlive, PingResponse, ScrollId, ScrollResponse, SearchRequest, StoreError,
};

/// Trait for talking to a search document store.
///
/// Every call blocks the calling pipeline until the store answers; callers
/// never have two requests in flight against one cursor.
#[async_trait::async_trait]
pub trait SearchStore: Send + Sync {
    /// Connectivity check against the store root.
    ///
    /// Only a transport failure is an error; any HTTP status is returned.
    async fn ping(&self) -> Result<PingResponse, StoreError>;

    /// Start a scroll over `index`, returning the first page and its cursor.
    async fn open_scroll(
        &self,
        index: &str,
        request: &SearchRequest,
        keep_alive: KeepAlive,
    ) -> Result<ScrollResponse, StoreError>;

    /// Fetch the page after `scroll_id`, renewing the cursor for `keep_alive`.
    async fn continue_scroll(
        &self,
        scroll_id: &ScrollId,
        keep_alive: KeepAlive,
    ) -> Result<ScrollResponse, StoreError>;

    /// Submit an NDJSON bulk body as one request.
    async fn bulk(&self, body: Vec<u8>) -> Result<BulkResponse, StoreError>;
}
