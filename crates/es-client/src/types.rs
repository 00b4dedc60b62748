//! Wire types of the store's scroll, bulk and root endpoints.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::fmt;

/// Opaque scroll cursor, round-tripped byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrollId(String);

impl ScrollId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScrollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the initial scroll request.
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub size: usize,
    /// Caller query, passed through verbatim. Omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Box<RawValue>>,
}

/// Body of a follow-up scroll request.
#[derive(Debug, Serialize)]
pub struct ScrollRequest<'a> {
    pub scroll: String,
    pub scroll_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ScrollResponse {
    #[serde(rename = "_scroll_id")]
    pub scroll_id: ScrollId,
    pub hits: Hits,
}

#[derive(Debug, Default, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// `hits.total`: a bare count on older servers, an object on newer ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object { value: u64, relation: String },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Object { value, .. } => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Absent when the index does not store sources.
    #[serde(rename = "_source", default)]
    pub source: Option<Box<RawValue>>,
}

/// Outcome of an accepted bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkResponse {
    pub status: u16,
    pub took: Option<u64>,
    /// The store reported at least one failed item.
    pub errors: bool,
    pub failed_items: usize,
}

impl BulkResponse {
    /// Response for an empty body, which is never sent.
    pub fn empty() -> Self {
        Self {
            status: 200,
            took: None,
            errors: false,
            failed_items: 0,
        }
    }

    /// Summarize a bulk response body.
    ///
    /// A body that is not the expected JSON shape is treated as carrying no
    /// item errors. When `errors` is set, at least one item counts as failed.
    pub fn from_body(status: u16, body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            tracing::debug!("Bulk response body is not JSON; ignoring item results");
            return Self {
                status,
                ..Self::empty()
            };
        };

        let errors = value
            .get("errors")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let failed_items = value
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| {
                        item.as_object()
                            .and_then(|ops| ops.values().next())
                            .is_some_and(|result| result.get("error").is_some())
                    })
                    .count()
            })
            .unwrap_or(0);
        // `errors: true` with no itemized failure still marks the request as
        // not clean
        let failed_items = if errors {
            failed_items.max(1)
        } else {
            failed_items
        };

        Self {
            status,
            took: value.get("took").and_then(Value::as_u64),
            errors,
            failed_items,
        }
    }
}

/// Raw answer of the store root endpoint.
#[derive(Debug, Clone)]
pub struct PingResponse {
    pub status: u16,
    pub body: String,
}

impl PingResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as the store's root banner, if it is one.
    pub fn banner(&self) -> Option<ClusterBanner> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterBanner {
    pub name: Option<String>,
    pub cluster_name: Option<String>,
    pub version: Option<BannerVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BannerVersion {
    pub number: Option<String>,
}

impl ClusterBanner {
    pub fn version_number(&self) -> Option<&str> {
        self.version.as_ref()?.number.as_deref()
    }
}
