//! Length-aware pagination metadata

use crate::config::DEFAULT_PAGE_NAME;
use serde::Serialize;

/// One page of items plus enough metadata to render page links
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Paginator<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub page_name: String,
}

impl<T> Paginator<T> {
    /// Page numbers start at 1; zero is treated as the first page
    pub fn new(items: Vec<T>, total: u64, per_page: u64, current_page: u64) -> Self {
        Self {
            items,
            total,
            per_page: per_page.max(1),
            current_page: current_page.max(1),
            page_name: DEFAULT_PAGE_NAME.to_string(),
        }
    }

    pub fn with_page_name(mut self, page_name: impl Into<String>) -> Self {
        self.page_name = page_name.into();
        self
    }

    /// Number of the last page, never below 1
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn on_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// 1-based position of the first item on this page
    pub fn first_item(&self) -> Option<u64> {
        if self.items.is_empty() {
            return None;
        }
        Some(
            (self.current_page - 1)
                .saturating_mul(self.per_page)
                .saturating_add(1),
        )
    }

    /// 1-based position of the last item on this page
    pub fn last_item(&self) -> Option<u64> {
        self.first_item()
            .map(|first| first.saturating_add(self.items.len() as u64 - 1))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keep the metadata, transform the items
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginator<U> {
        Paginator {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            page_name: self.page_name,
        }
    }
}
