//! Pagination

use serde::{Deserialize, Serialize};

/// Page size used when the requested size is zero or negative.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 50;

/// A normalised page request: 1-based page number, clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request from raw caller input, clamping out-of-range values.
    #[must_use]
    pub fn new(page_number: i64, page_size: i64) -> Self {
        let page_number = u32::try_from(page_number.max(1)).unwrap_or(u32::MAX);

        let page_size = if page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            u32::try_from(page_size)
                .unwrap_or(MAX_PAGE_SIZE)
                .min(MAX_PAGE_SIZE)
        };

        Self {
            page_number,
            page_size,
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page metadata derived from a total count and a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Records across all pages.
    pub total_count: u64,
    /// 1-based page number.
    pub page_number: u32,
    /// Page count at the requested size.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

impl PageMetadata {
    /// Derive page metadata for a total record count.
    #[must_use]
    pub fn calculate(total_count: u64, request: PageRequest) -> Self {
        let total_pages = total_count.div_ceil(u64::from(request.page_size));
        let page_number = request.page_number;

        Self {
            total_count,
            page_number,
            total_pages,
            has_next_page: u64::from(page_number) < total_pages,
            has_previous_page: page_number > 1,
        }
    }
}

/// One page of items with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Position of this page in the full result.
    #[serde(flatten)]
    pub metadata: PageMetadata,
}

impl<T> Page<T> {
    /// Build a page from its items and the total record count.
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            metadata: PageMetadata::calculate(total_count, request),
        }
    }

    /// Convert the items while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }
}
