// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! Continuation token based paging.
//!
//! A [`Paginator`] starts from a page that was already fetched and walks forward
//! by presenting the continuation token of the current page to a bound fetch function.
//! There is no pre-fetching, a request is only issued by [`Paginator::next`].
//!
//! ```no_run
//! # use opc_publisher_client::{PublisherClient, publisher_types::PublishedItemListRequest};
//! # async fn run(client: PublisherClient) -> opc_publisher_client::error::Result<()> {
//! let mut pages = client
//!     .list_published_nodes("ep-1", &PublishedItemListRequest::default())
//!     .await?;
//!
//! while pages.has_next() {
//!     let page = pages.next().await?;
//!     println!("{} more items", page.items().len());
//! }
//! # Ok(())
//! # }
//! ```

use futures::{future::BoxFuture, stream, Stream};

use crate::error::{Result, ValidationError};


/// Ordered items of one page and the token to continue with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    continuation_token: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page. An empty token is treated like a missing one.
    pub fn new(items: Vec<T>, continuation_token: Option<String>) -> Self {
        Self {
            items,
            continuation_token: continuation_token.filter(|token| !token.is_empty()),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Token to fetch the following page, `None` on the last page.
    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    /// Returns true if the page is followed by another page.
    pub fn has_next(&self) -> bool {
        self.continuation_token.is_some()
    }
}

/// Fetches the page that follows the given continuation token.
pub type FetchNextPage<T> = Box<dyn Fn(String) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>;

/// Forward-only iteration over pages.
///
/// `next` needs exclusive access, so a paginator cannot be driven from two places at once.
/// Use independent paginators for concurrent enumerations.
pub struct Paginator<T> {
    current: Page<T>,
    fetch_next: FetchNextPage<T>,
}

impl<T> std::fmt::Debug for Paginator<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Paginator<T> {
    pub fn new(first_page: Page<T>, fetch_next: FetchNextPage<T>) -> Self {
        Self {
            current: first_page,
            fetch_next,
        }
    }

    /// Returns the most recently fetched page.
    pub fn current(&self) -> &Page<T> {
        &self.current
    }

    /// Returns true if the current page carries a continuation token.
    pub fn has_next(&self) -> bool {
        self.current.has_next()
    }

    /// Fetches the page following the current one and makes it the current page.
    ///
    /// On error the current page stays unchanged, so the call may be repeated.
    /// Fails with [`ValidationError::NoMorePages`] without sending anything if the current page is the last one.
    pub async fn next(&mut self) -> Result<&Page<T>> {
        let token = self
            .current
            .continuation_token
            .clone()
            .ok_or(ValidationError::NoMorePages)?;

        let page = (self.fetch_next)(token).await?;
        self.current = page;

        Ok(&self.current)
    }

    /// Consumes the paginator and returns the current page.
    pub fn into_current(self) -> Page<T> {
        self.current
    }

    /// Returns a stream of all items, starting with the items of the current page.
    ///
    /// Following pages are fetched lazily once the items of the previous page have been yielded.
    /// The first error is yielded and ends the stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send {
        let Paginator {
            current,
            fetch_next,
        } = self;

        let state = StreamState {
            buffered: current.items.into_iter(),
            continuation_token: current.continuation_token,
            fetch_next,
        };

        stream::unfold(state, |mut state| async move {
            loop {
                if let Some(item) = state.buffered.next() {
                    return Some((Ok(item), state));
                }

                // The token is taken before fetching, so an error ends the stream.
                let token = state.continuation_token.take()?;

                match (state.fetch_next)(token).await {
                    Ok(page) => {
                        state.buffered = page.items.into_iter();
                        state.continuation_token = page.continuation_token;
                    }
                    Err(e) => return Some((Err(e), state)),
                }
            }
        })
    }
}

struct StreamState<T> {
    buffered: std::vec::IntoIter<T>,
    continuation_token: Option<String>,
    fetch_next: FetchNextPage<T>,
}
