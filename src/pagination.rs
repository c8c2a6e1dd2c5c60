//! Page requests, result pages and the lazy-count page assembler.

use serde::Serialize;
use thiserror::Error;

use crate::domain::search::SortOrder;

/// Rejected page request parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("page index must not be negative, got {0}")]
    NegativeIndex(i64),
    #[error("page size must be greater than zero, got {0}")]
    NonPositiveSize(i64),
    #[error("page {index} of size {size} starts beyond the addressable row range")]
    OffsetOverflow { index: i64, size: i64 },
}

/// Zero-based page window with an optional ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    index: usize,
    size: usize,
    sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(index: i64, size: i64) -> Result<Self, PageRequestError> {
        if index < 0 {
            return Err(PageRequestError::NegativeIndex(index));
        }
        if size <= 0 {
            return Err(PageRequestError::NonPositiveSize(size));
        }
        if index.checked_mul(size).is_none() {
            return Err(PageRequestError::OffsetOverflow { index, size });
        }
        Ok(Self {
            index: index as usize,
            size: size as usize,
            sort: Vec::new(),
        })
    }

    /// Appends a sort key; earlier keys take precedence.
    pub fn sorted_by(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of rows skipped before this page. Never exceeds `i64::MAX`.
    pub fn offset(&self) -> usize {
        self.index * self.size
    }

    pub fn sort(&self) -> &[SortOrder] {
        &self.sort
    }
}

/// Builds a compact list of 1-based page links around `current_page`.
///
/// `None` entries mark a gap between link groups.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index.
    pub index: usize,
    pub size: usize,
    pub total_elements: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            index: request.index(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_elements.div_ceil(self.size)
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// 1-based navigation links around the current page.
    pub fn page_links(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages(), self.index + 1, 2, 2, 4, 2)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            index: self.index,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

/// Wraps `content` in a [`Page`], running `count` only when the content
/// cannot determine the total by itself.
///
/// The count is skipped on a partial first page (the content is everything)
/// and on a partial, non-empty later page (it is the last one, so the total
/// is `offset + content.len()`).
pub fn assemble<T, E, F>(content: Vec<T>, request: &PageRequest, count: F) -> Result<Page<T>, E>
where
    F: FnOnce() -> Result<usize, E>,
{
    let len = content.len();
    let offset = request.offset();

    let total = if offset == 0 && len < request.size() {
        len
    } else if offset > 0 && len != 0 && len < request.size() {
        offset + len
    } else {
        let counted = count()?;
        if len == 0 {
            counted
        } else {
            counted.max(offset + len)
        }
    };

    Ok(Page::new(content, request, total))
}
