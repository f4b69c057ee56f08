//! Offset/limit pagination primitives shared by blog backend endpoints.
//!
//! [`PageParams`] validates the window a caller asks for, while
//! [`Paginated`] wraps one page of results together with the total number of
//! rows available. Both types are transport agnostic: HTTP adapters decide how
//! query strings map onto them and how envelopes are serialised.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of items returned when a request omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised while validating page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageParamsError {
    /// `limit` was zero.
    #[error("limit must be at least 1")]
    ZeroLimit,
    /// `limit` exceeded [`MAX_LIMIT`].
    #[error("limit must not exceed {max}")]
    LimitTooLarge {
        /// Upper bound accepted for `limit`.
        max: u32,
    },
}

/// Validated offset/limit window.
///
/// ## Invariants
/// - `limit` is within `1..=MAX_LIMIT`.
///
/// # Examples
/// ```
/// use pagination::{DEFAULT_LIMIT, PageParams};
///
/// let params = PageParams::new(None, None).expect("defaults are valid");
/// assert_eq!(params.offset(), 0);
/// assert_eq!(params.limit(), DEFAULT_LIMIT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    offset: u32,
    limit: u32,
}

impl PageParams {
    /// Build page parameters, applying defaults for omitted values.
    ///
    /// # Errors
    ///
    /// Returns [`PageParamsError`] when `limit` is zero or above
    /// [`MAX_LIMIT`].
    pub const fn new(offset: Option<u32>, limit: Option<u32>) -> Result<Self, PageParamsError> {
        let offset = match offset {
            Some(value) => value,
            None => 0,
        };
        let limit = match limit {
            Some(0) => return Err(PageParamsError::ZeroLimit),
            Some(value) if value > MAX_LIMIT => {
                return Err(PageParamsError::LimitTooLarge { max: MAX_LIMIT });
            }
            Some(value) => value,
            None => DEFAULT_LIMIT,
        };
        Ok(Self { offset, limit })
    }

    /// Number of items to skip.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the window that produced it.
///
/// # Examples
/// ```
/// use pagination::{PageParams, Paginated};
///
/// let page = Paginated::new(vec![1, 2], PageParams::default(), 5);
/// assert!(page.has_more());
/// let doubled = page.map(|value| value * 2);
/// assert_eq!(doubled.data, vec![2, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Items in this page.
    pub data: Vec<T>,
    /// Offset used to build the page.
    pub offset: u32,
    /// Limit used to build the page.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Wrap a page of items.
    #[must_use]
    pub const fn new(data: Vec<T>, params: PageParams, total: u64) -> Self {
        Self {
            data,
            offset: params.offset(),
            limit: params.limit(),
            total,
        }
    }

    /// Whether items remain beyond this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        let seen = u64::from(self.offset).saturating_add(self.data.len() as u64);
        seen < self.total
    }

    /// Convert every item while keeping the window metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            offset: self.offset,
            limit: self.limit,
            total: self.total,
        }
    }
}
