use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PageSize – the allowed rows-per-page choices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Fifty,
    ];

    pub fn rows(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|p| p.rows() == n)
            .ok_or_else(|| format!("page size must be one of 5, 10, 20, 50 (got {n})"))
    }
}

impl From<PageSize> for usize {
    fn from(p: PageSize) -> usize {
        p.rows()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows", self.rows())
    }
}

// ---------------------------------------------------------------------------
// Page arithmetic (1-based page indices)
// ---------------------------------------------------------------------------

/// `ceil(count / page_size)`; zero when there is nothing to show.
pub fn total_pages(count: usize, page_size: PageSize) -> usize {
    count.div_ceil(page_size.rows())
}

/// Clamp a 1-based page index into `[1, max(total, 1)]`.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// Index range of page `page` within `count` items.
pub fn page_bounds(count: usize, page: usize, page_size: PageSize) -> Range<usize> {
    let size = page_size.rows();
    let start = page.saturating_sub(1).saturating_mul(size).min(count);
    let end = start.saturating_add(size).min(count);
    start..end
}

/// The slice of `items` shown on page `page`.
pub fn page_slice<T>(items: &[T], page: usize, page_size: PageSize) -> &[T] {
    &items[page_bounds(items.len(), page, page_size)]
}
