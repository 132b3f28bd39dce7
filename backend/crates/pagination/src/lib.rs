//! Page/limit pagination primitives shared by BitSlow listing endpoints.
//!
//! Listing endpoints accept a one-based `page` number and a `limit` and
//! return a [`Page`] envelope carrying the items alongside the total number
//! of matching records. The offset is always `(page - 1) * limit`; no upper
//! bound is imposed on `limit`.
//!
//! # Example
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(3, 10).expect("valid request");
//! assert_eq!(request.offset(), 20);
//!
//! let page = Page::new(vec!["a", "b"], 22, request);
//! assert_eq!(page.total_pages(), 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 15;

/// Validation failures for page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// Validated one-based page request.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.limit)
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
        }
    }
}

impl PageRequest {
    /// Build a request, rejecting zero pages and zero limits.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when either value is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// Build a request from optional query values, applying
    /// [`DEFAULT_PAGE`] and `default_limit` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when a supplied value is zero.
    pub fn from_optional(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Result<Self, PageRequestError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(default_limit),
        )
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records skipped before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the total number of matching records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    page: u32,
    limit: u32,
}

impl<T> Page<T> {
    /// Wrap `items` fetched for `request`.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total number of records across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// One-based page number this page was fetched for.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size this page was fetched with.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of pages needed to show every record.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.limit as u64)
    }

    /// Convert each item, keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for page arithmetic and validation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 15, 0)]
    #[case(2, 15, 15)]
    #[case(4, 7, 21)]
    #[case(u32::MAX, u32::MAX, (u32::MAX as u64 - 1) * u32::MAX as u64)]
    fn offset_is_page_minus_one_times_limit(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: u64,
    ) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.offset(), expected);
    }

    #[rstest]
    #[case(0, 10, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::ZeroLimit)]
    fn zero_values_are_rejected(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    fn missing_values_fall_back_to_defaults() {
        let request = PageRequest::from_optional(None, None, 30).expect("defaults are valid");
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.limit(), 30);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(15, 1)]
    #[case(16, 2)]
    #[case(45, 3)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] expected: u64) {
        let page = Page::<u8>::new(Vec::new(), total, PageRequest::default());
        assert_eq!(page.total_pages(), expected);
    }

    #[rstest]
    fn map_preserves_metadata() {
        let request = PageRequest::new(2, 5).expect("valid request");
        let page = Page::new(vec![1, 2, 3], 8, request).map(|value| value * 10);
        assert_eq!(page.items(), &[10, 20, 30]);
        assert_eq!(page.total(), 8);
        assert_eq!(page.page(), 2);
        assert_eq!(page.limit(), 5);
    }

    #[rstest]
    fn deserialising_rejects_zero_limit() {
        let result = serde_json::from_str::<PageRequest>(r#"{"page":1,"limit":0}"#);
        assert!(result.is_err());
    }
}
