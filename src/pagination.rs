//! Query-string builder for paginated list endpoints and the page envelope.
//!
//! List endpoints accept `page`, `size`, one or more `sort=field,direction`
//! pairs, and entity-specific filters. Builder methods return `&mut Self`
//! for chaining.
//!
//! # Example
//!
//! ```rust
//! use booking_dashboard_sdk::pagination::{PageRequest, SortDirection};
//! let query = PageRequest::new()
//!     .page(0)
//!     .size(20)
//!     .sort("date", SortDirection::Desc)
//!     .filter("status", "PENDING")
//!     .to_query();
//! assert_eq!(query[0], ("page".to_string(), "0".to_string()));
//! ```

use std::fmt;

use serde::Serialize;

/// Sort direction for a `sort` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the query parameters of one list request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    page: Option<u32>,
    size: Option<u32>,
    sort: Vec<(String, SortDirection)>,
    filters: Vec<(String, String)>,
}

impl PageRequest {
    /// Upper bound on `size`; larger values are clamped.
    pub const MAX_SIZE: u32 = 2000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based page index.
    pub fn page(&mut self, page: u32) -> &mut Self {
        self.page = Some(page);
        self
    }

    /// Page size, clamped to `1..=MAX_SIZE`.
    pub fn size(&mut self, size: u32) -> &mut Self {
        self.size = Some(size.clamp(1, Self::MAX_SIZE));
        self
    }

    /// Append a sort key. Multiple keys are sent in call order.
    pub fn sort(&mut self, field: &str, direction: SortDirection) -> &mut Self {
        self.sort.push((field.to_string(), direction));
        self
    }

    /// Add an entity-specific filter parameter.
    pub fn filter(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.filters.push((key.to_string(), value.to_string()));
        self
    }

    /// Add every `(key, value)` pair produced by a filter object.
    pub fn filters<I>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.filters.extend(pairs);
        self
    }

    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    pub fn page_size(&self) -> Option<u32> {
        self.size
    }

    /// Render the request as ordered query pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(page) = self.page {
            out.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            out.push(("size".to_string(), size.to_string()));
        }
        for (field, direction) in &self.sort {
            out.push(("sort".to_string(), format!("{},{}", field, direction)));
        }
        out.extend(self.filters.iter().cloned());
        out
    }
}

/// One page of normalized entities plus the server-side total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// From the `x-total-count` header, or the item count when absent.
    pub total: u64,
    #[serde(skip)]
    reported: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: Option<u64>) -> Self {
        let reported = total.is_some();
        let total = total.unwrap_or(items.len() as u64);
        Self {
            items,
            total,
            reported,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            reported: false,
        }
    }

    /// Whether `total` came from the server rather than the item count.
    /// Without it, `total` says nothing about later pages.
    pub fn has_reported_total(&self) -> bool {
        self.reported
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages of `size` needed to cover `total`.
    pub fn total_pages(&self, size: u32) -> u64 {
        let size = u64::from(size.max(1));
        self.total.div_ceil(size)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            reported: self.reported,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
