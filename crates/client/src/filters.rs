//! Staged search input and category selection.
//!
//! Search is staged: the raw input is tracked separately from the committed
//! term, and only an explicit submit moves one into the other - and only
//! when the input is empty or at least [`MIN_SEARCH_LEN`] characters.
//! Deleting the input down to empty clears the committed term immediately.

use shopfeed_core::{CatalogFilter, CategoryFilter};

/// Minimum committed search length.
pub const MIN_SEARCH_LEN: usize = 3;

/// Staged search input with an explicit commit step.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    input: String,
    committed: Option<String>,
}

impl SearchBox {
    /// The raw, uncommitted input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The committed search term.
    #[must_use]
    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    /// Whether a submit would commit the current input.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.input.is_empty() || self.input.chars().count() >= MIN_SEARCH_LEN
    }

    /// Warning state: input present but too short to commit.
    #[must_use]
    pub fn below_min_length(&self) -> bool {
        !self.input.is_empty() && self.input.chars().count() < MIN_SEARCH_LEN
    }

    /// Replace the raw input. Returns `true` when the committed term
    /// changed (it clears immediately when the input is emptied).
    pub fn set_input(&mut self, value: impl Into<String>) -> bool {
        self.input = value.into();
        if self.input.is_empty() && self.committed.is_some() {
            self.committed = None;
            return true;
        }
        false
    }

    /// Explicit submission (Enter key or button). Returns `true` when the
    /// committed term changed; too-short input never changes it.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        let next = if self.input.is_empty() {
            None
        } else {
            Some(self.input.clone())
        };
        if next == self.committed {
            return false;
        }
        self.committed = next;
        true
    }

    /// Reset both the input and the committed term. Returns `true` when
    /// the committed term changed.
    pub fn clear(&mut self) -> bool {
        self.input.clear();
        self.committed.take().is_some()
    }
}

/// The filter bar: a search box plus a category selector.
///
/// Every mutator returns the new [`CatalogFilter`] when the committed
/// context changed, ready to send as a `FiltersChanged` event; `None`
/// means nothing the feed cares about moved.
#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    search: SearchBox,
    category: CategoryFilter,
}

impl FilterPanel {
    /// The search box, for rendering its staged state.
    #[must_use]
    pub const fn search(&self) -> &SearchBox {
        &self.search
    }

    /// The selected category.
    #[must_use]
    pub const fn category(&self) -> CategoryFilter {
        self.category
    }

    /// The committed filter context.
    #[must_use]
    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            search: self.search.committed().map(String::from),
            category: self.category,
        }
    }

    /// Whether any filter deviates from the defaults.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.filter().is_unfiltered()
    }

    /// Update the raw search input.
    pub fn set_search_input(&mut self, value: impl Into<String>) -> Option<CatalogFilter> {
        self.search.set_input(value).then(|| self.filter())
    }

    /// Submit the staged search input.
    pub fn submit_search(&mut self) -> Option<CatalogFilter> {
        self.search.submit().then(|| self.filter())
    }

    /// Select a category.
    pub fn set_category(&mut self, category: CategoryFilter) -> Option<CatalogFilter> {
        if self.category == category {
            return None;
        }
        self.category = category;
        Some(self.filter())
    }

    /// Reset search and category to defaults.
    pub fn clear(&mut self) -> Option<CatalogFilter> {
        let search_changed = self.search.clear();
        let category_changed = self.category != CategoryFilter::All;
        self.category = CategoryFilter::All;
        (search_changed || category_changed).then(|| self.filter())
    }
}
