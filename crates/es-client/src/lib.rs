//! Search store client for es-archive.
//!
//! This crate defines the `SearchStore` trait that the export and import
//! pipelines are written against, the wire types of the store's scroll and
//! bulk APIs, and `HttpStore`, the Elasticsearch-compatible implementation
//! over HTTP+JSON.
//!
//! Pipelines are generic over the trait so tests can drive them with an
//! in-memory store:
//!
//! ```ignore
//! pub async fn export<S: SearchStore + ?Sized>(store: &S, ...) -> Result<ExportSummary> {
//!     let page = store.open_scroll(index, &request, keep_alive).await?;
//!     // ...
//! }
//! ```

mod error;
mod http;
mod keep_alive;
mod store;
mod types;

pub use error::StoreError;
pub use http::HttpStore;
pub use keep_alive::KeepAlive;
pub use store::SearchStore;
pub use types::{
    BannerVersion, BulkResponse, ClusterBanner, Hit, Hits, PingResponse, ScrollId, ScrollRequest,
    ScrollResponse, SearchRequest, TotalHits,
};

/// Content type of bulk request bodies
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";
