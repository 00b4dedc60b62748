//! Scroll cursor handling

use crate::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result};
use es_client::{KeepAlive, ScrollId, ScrollResponse, SearchRequest, SearchStore};
use futures::{Stream, TryStreamExt};
use serde_json::value::RawValue;

/// Settings for one scroll.
#[derive(Debug, Clone)]
pub struct ScrollOptions {
    /// Index (or alias) to search
    pub index: String,

    /// Documents requested per page
    pub page_size: usize,

    /// Cursor lifetime, renewed on every fetch
    pub keep_alive: KeepAlive,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            index: "documents".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            keep_alive: KeepAlive::default(),
        }
    }
}

/// One non-empty page of results.
#[derive(Debug)]
pub struct Page {
    /// `_source` of every hit, in the order the store returned them
    pub documents: Vec<Box<RawValue>>,

    /// Hits on this page that carried no `_source`
    pub missing_source: usize,
}

enum State {
    Pending(SearchRequest),
    Open(ScrollId),
    Finished,
}

/// A single pass over a scroll cursor.
///
/// Not restartable: once [`Scroll::next_page`] returns `None` or an error,
/// every further call returns `None` without contacting the store.
pub struct Scroll<'a, S: SearchStore + ?Sized> {
    store: &'a S,
    index: String,
    keep_alive: KeepAlive,
    state: State,
    fetches: usize,
    total_hits: Option<u64>,
}

impl<'a, S: SearchStore + ?Sized> Scroll<'a, S> {
    pub fn new(store: &'a S, query: Option<Box<RawValue>>, opts: &ScrollOptions) -> Self {
        Self {
            store,
            index: opts.index.clone(),
            keep_alive: opts.keep_alive,
            state: State::Pending(SearchRequest {
                size: opts.page_size,
                query,
            }),
            fetches: 0,
            total_hits: None,
        }
    }

    /// Fetch the next page, or `None` once the store returns an empty page.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        let response = match std::mem::replace(&mut self.state, State::Finished) {
            State::Pending(request) => {
                self.fetches += 1;
                self.store
                    .open_scroll(&self.index, &request, self.keep_alive)
                    .await
                    .with_context(|| {
                        format!("Initial scroll request on index '{}' failed", self.index)
                    })?
            }
            State::Open(scroll_id) => {
                self.fetches += 1;
                self.store
                    .continue_scroll(&scroll_id, self.keep_alive)
                    .await
                    .with_context(|| format!("Scroll request {} failed", self.fetches))?
            }
            State::Finished => return Ok(None),
        };

        let ScrollResponse { scroll_id, hits } = response;
        if self.total_hits.is_none() {
            self.total_hits = hits.total.map(|total| total.value());
        }

        if hits.hits.is_empty() {
            tracing::debug!("Scroll finished after {} fetches", self.fetches);
            return Ok(None);
        }
        self.state = State::Open(scroll_id);

        let mut documents = Vec::with_capacity(hits.hits.len());
        let mut missing_source = 0;
        for hit in hits.hits {
            match hit.source {
                Some(source) => documents.push(source),
                None => {
                    tracing::warn!(
                        "Skipping hit {} without _source",
                        hit.id.as_deref().unwrap_or("<unknown>")
                    );
                    missing_source += 1;
                }
            }
        }

        Ok(Some(Page {
            documents,
            missing_source,
        }))
    }

    /// Number of fetches issued so far.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// `hits.total` of the first response, if the store reported one.
    pub fn total_hits(&self) -> Option<u64> {
        self.total_hits
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished) && self.fetches > 0
    }

    /// Consume the scroll as a lazy stream of documents.
    ///
    /// Each page is fetched only when the previous one has been consumed.
    pub fn documents(self) -> impl Stream<Item = Result<Box<RawValue>>> + 'a {
        futures::stream::try_unfold(self, |mut scroll| async move {
            let page = scroll.next_page().await?;
            Ok::<_, anyhow::Error>(page.map(|page| (page.documents, scroll)))
        })
        .map_ok(|documents| {
            futures::stream::iter(documents.into_iter().map(Ok::<_, anyhow::Error>))
        })
        .try_flatten()
    }
}
