/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The cursor every run returns.

use aws_sdk_dynamodb::operation::query::builders::QueryInputBuilder;
use aws_sdk_dynamodb::operation::scan::builders::ScanInputBuilder;
use ddb_mapper_core::{Attributes, Deitemizer, Item};
use tracing::debug;

use crate::context::Context;
use crate::dynamo::Dynamo;
use crate::error::Error;
use crate::op::OperationKind;

#[derive(Debug)]
enum State {
    /// No page fetched yet.
    Unstarted,
    /// A page is held. `pos` is `None` until the first item of the page is reached.
    Holding {
        items: Vec<Attributes>,
        pos: Option<usize>,
        continuation: Option<Attributes>,
    },
    Exhausted,
    Failed(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Counting {
    /// `len` reports the items of the current page.
    Page,
    /// `len` reports every item fetched so far.
    Running,
}

#[derive(Debug)]
enum Request {
    Query(QueryInputBuilder),
    Scan(ScanInputBuilder),
}

struct Page {
    items: Vec<Attributes>,
    continuation: Option<Attributes>,
}

/// Re-issues a query or scan page by page.
#[derive(Debug)]
struct Pager<'a> {
    store: &'a dyn Dynamo,
    cx: Context,
    request: Request,
}

impl Pager<'_> {
    fn kind(&self) -> OperationKind {
        match self.request {
            Request::Query(_) => OperationKind::Query,
            Request::Scan(_) => OperationKind::Scan,
        }
    }

    /// Fetches the page starting after `start`, or the first page when `start` is `None`.
    ///
    /// Only the exclusive start key of the original request changes between pages.
    async fn fetch(&mut self, start: Option<Attributes>) -> Result<Page, Error> {
        let operation = self.kind();
        let fetch_failed = |source| Error::Fetch { operation, source };
        let (items, continuation) = match &mut self.request {
            Request::Query(input) => {
                if start.is_some() {
                    *input = std::mem::take(input).set_exclusive_start_key(start);
                }
                let out = self
                    .cx
                    .call(self.store.query(input.clone()))
                    .await
                    .map_err(fetch_failed)?;
                (out.items, out.last_evaluated_key)
            }
            Request::Scan(input) => {
                if start.is_some() {
                    *input = std::mem::take(input).set_exclusive_start_key(start);
                }
                let out = self
                    .cx
                    .call(self.store.scan(input.clone()))
                    .await
                    .map_err(fetch_failed)?;
                (out.items, out.last_evaluated_key)
            }
        };
        let page = Page {
            items: items.unwrap_or_default(),
            continuation: continuation.filter(|key| !key.is_empty()),
        };
        debug!(
            %operation,
            items = page.items.len(),
            more = page.continuation.is_some(),
            "fetched page"
        );
        Ok(page)
    }
}

/// A single-pass cursor over the items produced by a run.
///
/// Query and scan cursors fetch lazily: the first page is requested by the first
/// call to [`next`](Cursor::next) and each further page when the held one is used
/// up and the store reported more. Cursors returned by reads and writes hold their
/// items already and never call the store.
///
/// A cursor is not restartable and consumed items are not kept.
#[derive(Debug)]
pub struct Cursor<'a> {
    state: State,
    pager: Option<Pager<'a>>,
    counting: Counting,
    fetched: usize,
    page_len: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn querying(store: &'a dyn Dynamo, cx: Context, input: QueryInputBuilder) -> Self {
        Self::paging(store, cx, Request::Query(input), Counting::Page)
    }

    pub(crate) fn scanning(store: &'a dyn Dynamo, cx: Context, input: ScanInputBuilder) -> Self {
        Self::paging(store, cx, Request::Scan(input), Counting::Running)
    }

    fn paging(store: &'a dyn Dynamo, cx: Context, request: Request, counting: Counting) -> Self {
        Cursor {
            state: State::Unstarted,
            pager: Some(Pager { store, cx, request }),
            counting,
            fetched: 0,
            page_len: 0,
        }
    }
}

impl Cursor<'static> {
    /// A cursor over items that are already known.
    pub(crate) fn materialized(items: Vec<Attributes>) -> Self {
        let len = items.len();
        Cursor {
            state: State::Holding {
                items,
                pos: None,
                continuation: None,
            },
            pager: None,
            counting: Counting::Running,
            fetched: len,
            page_len: len,
        }
    }

    /// A cursor without items.
    pub(crate) fn empty() -> Self {
        Self::materialized(Vec::new())
    }
}

impl Cursor<'_> {
    /// Advances to the next item, fetching a page when needed.
    ///
    /// Returns `false` once the items are exhausted or a fetch failed; the failure
    /// is then available from [`err`](Cursor::err). Pages that come back empty
    /// but report more items are skipped.
    pub async fn next(&mut self) -> bool {
        loop {
            let start = match &mut self.state {
                State::Exhausted | State::Failed(_) => return false,
                State::Unstarted => None,
                State::Holding {
                    items,
                    pos,
                    continuation,
                } => {
                    let next = pos.map_or(0, |p| p + 1);
                    if next < items.len() {
                        *pos = Some(next);
                        return true;
                    }
                    match continuation.take() {
                        Some(key) => Some(key),
                        None => {
                            self.state = State::Exhausted;
                            return false;
                        }
                    }
                }
            };

            let Some(pager) = self.pager.as_mut() else {
                self.state = State::Exhausted;
                return false;
            };
            match pager.fetch(start).await {
                Ok(page) => {
                    self.page_len = page.items.len();
                    self.fetched += page.items.len();
                    self.state = State::Holding {
                        items: page.items,
                        pos: None,
                        continuation: page.continuation,
                    };
                }
                Err(err) => {
                    self.state = State::Failed(err);
                    return false;
                }
            }
        }
    }

    fn current(&self) -> Option<&Attributes> {
        match &self.state {
            State::Holding {
                items,
                pos: Some(pos),
                ..
            } => items.get(*pos),
            _ => None,
        }
    }

    /// Decodes the current item into `dest`.
    ///
    /// Fails with [`Error::InvalidCursorState`] unless the last call to
    /// [`next`](Cursor::next) returned `true`.
    pub fn scan<D>(&self, dest: &mut D) -> Result<(), Error>
    where
        D: Deitemizer + ?Sized,
    {
        let attrs = self.current().ok_or(Error::InvalidCursorState)?;
        let item = D::Item::from_attributes(attrs.clone()).map_err(Error::Mapping)?;
        dest.from_item(item).map_err(Error::Mapping)
    }

    /// The fetch error that stopped the cursor, if any.
    pub fn err(&self) -> Option<&Error> {
        match &self.state {
            State::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Consumes the cursor, returning the fetch error that stopped it, if any.
    pub fn into_err(self) -> Option<Error> {
        match self.state {
            State::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// A point-in-time item count.
    ///
    /// Zero before the first fetch. Query cursors report the items of the page
    /// currently held; scan and materialized cursors report every item fetched so
    /// far, which equals the number of items yielded once the cursor is exhausted.
    /// The store does not report totals up front, so this is not a final count
    /// until then.
    pub fn len(&self) -> usize {
        match self.counting {
            Counting::Page => self.page_len,
            Counting::Running => self.fetched,
        }
    }

    /// Returns true if [`len`](Cursor::len) is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items in the page currently held.
    pub fn page_len(&self) -> usize {
        self.page_len
    }

    /// Items fetched across all pages so far.
    pub fn fetched(&self) -> usize {
        self.fetched
    }
}
