//! Page arithmetic. Pages are 1-based throughout.

use std::ops::RangeInclusive;

/// `max(1, ceil(len / page_size))`. A zero page size is treated as one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, total]`.
pub fn clamp_page(requested: usize, total: usize) -> usize {
    requested.clamp(1, total.max(1))
}

/// Where a page sits inside the sequence, for rendering controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Clamped 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    /// Length of the sequence being paginated.
    pub total_items: usize,
    /// Index of the first item on the page.
    pub start: usize,
    /// One past the index of the last item on the page.
    pub end: usize,
}

impl PageInfo {
    /// Locate page `requested` (clamped) in a sequence of `len` items.
    pub fn new(len: usize, page_size: usize, requested: usize) -> Self {
        let page_size = page_size.max(1);
        let total = total_pages(len, page_size);
        let page = clamp_page(requested, total);
        let start = ((page - 1) * page_size).min(len);
        let end = (start + page_size).min(len);
        Self {
            page,
            total_pages: total,
            total_items: len,
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// `"Showing 16 to 30 of 42 results"`.
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "Showing 0 results".to_string();
        }
        format!(
            "Showing {} to {} of {} results",
            self.start + 1,
            self.end,
            self.total_items
        )
    }
}

/// Slice `items` to page `requested`, clamped into range.
pub fn paginate<T>(items: &[T], page_size: usize, requested: usize) -> (&[T], PageInfo) {
    let info = PageInfo::new(items.len(), page_size, requested);
    (&items[info.start..info.end], info)
}

/// The page numbers to offer as direct-jump buttons.
///
/// At most `width` consecutive pages: the first pages while near the start,
/// the last pages while near the end, otherwise centred on `current`.
pub fn page_window(current: usize, total: usize, width: usize) -> RangeInclusive<usize> {
    let total = total.max(1);
    let width = width.clamp(1, total);
    let current = clamp_page(current, total);
    let half = width / 2;

    let first = if current <= half + 1 {
        1
    } else if current + (width - half - 1) >= total {
        total - width + 1
    } else {
        current - half
    };
    first..=first + width - 1
}
