//! Caller-driven pagination.
//!
//! A [`Pager`] fetches one page per call to [`Pager::next`]. It follows
//! `@odata.nextLink` when the service provides one and otherwise advances
//! `$skip` by the number of records received, stopping at the first empty
//! or short page. Nothing is fetched until the caller asks.

use futures::Stream;
use tracing::debug;
use wfrmls_core::{ApiError, QueryParameters, Record, ResponseEnvelope};

use crate::facade::{EntitySet, ResourceClient};

// ============================================================================
// Pager
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    NextLink(String),
    Skip(u32),
    Done,
}

/// Page-at-a-time iterator over an entity set.
#[derive(Debug)]
pub struct Pager<R: EntitySet> {
    resource: ResourceClient<R>,
    params: QueryParameters,
    page_size: u32,
    offset: u32,
    cursor: Cursor,
    pages_fetched: usize,
}

impl<R: EntitySet> Pager<R> {
    /// Creates a pager. `$top` defaults to the configured maximum.
    pub(crate) fn new(resource: ResourceClient<R>, mut params: QueryParameters) -> Self {
        let page_size = params
            .top
            .unwrap_or_else(|| resource.odata().config().max_top());
        params.top = Some(page_size);
        let offset = params.skip.unwrap_or(0);

        Self {
            resource,
            params,
            page_size,
            offset,
            cursor: Cursor::Start,
            pages_fetched: 0,
        }
    }

    /// Returns the page size requested with `$top`.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns true once no further page will be requested.
    pub fn is_done(&self) -> bool {
        self.cursor == Cursor::Done
    }

    /// Fetches the next page, or `None` when paging has finished.
    ///
    /// An error ends paging.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying request.
    pub async fn next(&mut self) -> Result<Option<ResponseEnvelope>, ApiError> {
        let envelope = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Done => return Ok(None),
            Cursor::Start => self.resource.list(self.params.clone()).await?,
            Cursor::Skip(skip) => self.resource.list(self.params.clone().skip(skip)).await?,
            Cursor::NextLink(link) => self.resource.odata().get_next_link(&link).await?,
        };

        self.pages_fetched += 1;
        self.cursor = self.advance(&envelope);
        debug!(
            resource = R::DESCRIPTOR.entity_set,
            page = self.pages_fetched,
            records = envelope.len(),
            done = self.is_done(),
            "Fetched page"
        );
        Ok(Some(envelope))
    }

    /// Converts the pager into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResponseEnvelope, ApiError>> {
        futures::stream::unfold(self, |mut pager| async move {
            match pager.next().await {
                Ok(Some(page)) => Some((Ok(page), pager)),
                Ok(None) => None,
                Err(err) => Some((Err(err), pager)),
            }
        })
    }

    fn advance(&mut self, envelope: &ResponseEnvelope) -> Cursor {
        if envelope.is_empty() {
            return Cursor::Done;
        }

        let received = u32::try_from(envelope.len()).unwrap_or(u32::MAX);
        self.offset = self.offset.saturating_add(received);

        match &envelope.odata_next_link {
            Some(link) => Cursor::NextLink(link.clone()),
            None if received >= self.page_size => Cursor::Skip(self.offset),
            None => Cursor::Done,
        }
    }
}

// ============================================================================
// Paged Result
// ============================================================================

/// Records gathered from several pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedResult {
    /// Records from every page, in order.
    pub value: Vec<Record>,
    /// Number of pages fetched.
    pub pages_fetched: usize,
    /// `@odata.count` from the first page that reported one.
    pub odata_count: Option<u64>,
    /// `@odata.nextLink` of the last page fetched.
    pub last_next_link: Option<String>,
    /// Set when collection stopped at the page bound while the pager would
    /// have requested another page.
    pub truncated: bool,
}

impl PagedResult {
    /// Returns true if the service had more pages than were fetched.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn push(&mut self, page: ResponseEnvelope) {
        self.pages_fetched += 1;
        self.odata_count = self.odata_count.or(page.odata_count);
        self.last_next_link = page.odata_next_link;
        self.value.extend(page.value);
    }
}

// ============================================================================
// Tests
// ============================================================================
