//! Paged public college listing.

use edvise_core::{College, Result};
use edvise_store::RecordStore;

/// Colleges shown per page.
pub const PAGE_SIZE: usize = 3;

/// The public listing: one fetch, local paging, local detail selection.
///
/// Paging wraps around in both directions so the next/previous controls are
/// never dead ends.
#[derive(Debug, Clone, Default)]
pub struct CollegeListing {
    colleges: Vec<College>,
    page: usize,
    selected: Option<String>,
}

impl CollegeListing {
    /// Fetch the full college set once and start on the first page.
    pub async fn load(store: &dyn RecordStore) -> Result<Self> {
        let colleges = store.list_colleges().await?;
        tracing::info!(count = colleges.len(), "Loaded public college listing");
        Ok(Self::from_colleges(colleges))
    }

    /// Build a listing over an already-fetched set.
    pub fn from_colleges(colleges: Vec<College>) -> Self {
        Self {
            colleges,
            page: 0,
            selected: None,
        }
    }

    /// Total number of colleges.
    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    /// Whether the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }

    /// Number of pages, ceiling division by [`PAGE_SIZE`].
    pub fn page_count(&self) -> usize {
        self.colleges.len().div_ceil(PAGE_SIZE)
    }

    /// Zero-based index of the current page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// The colleges on the current page, store order.
    pub fn visible(&self) -> &[College] {
        let start = self.page * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.colleges.len());
        self.colleges.get(start..end).unwrap_or_default()
    }

    /// Advance one page, wrapping from the last page to the first.
    ///
    /// A no-op on an empty listing.
    pub fn next_page(&mut self) {
        let pages = self.page_count();
        if pages > 0 {
            self.page = (self.page + 1) % pages;
        }
    }

    /// Go back one page, wrapping from the first page to the last.
    pub fn prev_page(&mut self) {
        let pages = self.page_count();
        if pages > 0 {
            self.page = (self.page + pages - 1) % pages;
        }
    }

    /// Open the detail view for `id`. Returns `false` for an unknown id,
    /// leaving any existing selection in place.
    pub fn select(&mut self, id: &str) -> bool {
        if self.colleges.iter().any(|c| c.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// The college currently open in the detail view.
    pub fn selected(&self) -> Option<&College> {
        let id = self.selected.as_deref()?;
        self.colleges.iter().find(|c| c.id == id)
    }

    /// Close the detail view.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
