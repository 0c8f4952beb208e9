//! Limit/offset pagination envelope primitives.
//!
//! The order-history endpoint pages with `limit`/`offset` query parameters
//! and answers with an envelope carrying the page items plus the total row
//! count. [`PageRequest`] mirrors the server-side parameter constraints so an
//! out-of-range request is rejected before it leaves the client, and
//! [`Page`] is the decoded envelope with helpers for issuing the follow-up
//! request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size applied when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size the backend accepts.
pub const MAX_LIMIT: u32 = 100;

/// Validation errors returned when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Limit falls outside the backend's accepted `1..=MAX_LIMIT` range.
    #[error("page limit must be between 1 and {MAX_LIMIT}, got {limit}")]
    LimitOutOfRange {
        /// The rejected limit value.
        limit: u32,
    },
}

/// A validated limit/offset window over a remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl PageRequest {
    /// Construct a request, enforcing the backend's `1..=MAX_LIMIT` limit
    /// range.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::LimitOutOfRange`] when `limit` is zero or
    /// exceeds [`MAX_LIMIT`].
    pub const fn new(limit: u32, offset: u32) -> Result<Self, PageRequestError> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange { limit });
        }
        Ok(Self { limit, offset })
    }

    /// The first page with the default page size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    /// Requested page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Number of rows skipped before this page starts.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// The request for the window immediately after this one, keeping the
    /// same page size.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One decoded page of a remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items within the requested window, in server order.
    pub items: Vec<T>,
    /// Total number of rows in the collection, across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Assemble a page from decoded items and the reported total.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Number of items in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the window that produced this page reaches the end of the
    /// collection, meaning a [`PageRequest::next`] request would be empty.
    #[must_use]
    pub fn is_last(&self, request: PageRequest) -> bool {
        u64::from(request.offset()) + self.items.len() as u64 >= self.total
    }
}
