//! The filter context: committed search term plus category selection.

use crate::types::category::CategoryFilter;
use crate::types::product::Product;

/// The (search, category) pair that determines which page sequence is being
/// accumulated.
///
/// `search` holds a committed term - the filter controls guarantee it is
/// either absent or at least three characters. Changing either field
/// invalidates every accumulated page, so the pair is `Hash + Eq` and keys
/// the client's response cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CatalogFilter {
    /// Committed search term, matched as a case-insensitive substring.
    pub search: Option<String>,
    /// Category selection.
    pub category: CategoryFilter,
}

impl CatalogFilter {
    /// Filter with a committed search term and no category restriction.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            category: CategoryFilter::All,
        }
    }

    /// Filter restricted to one category selection.
    #[must_use]
    pub fn category(category: CategoryFilter) -> Self {
        Self {
            search: None,
            category,
        }
    }

    /// True when neither search nor category restricts the catalog.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_none() && self.category == CategoryFilter::All
    }

    /// Whether `product` passes both the category and the search filter.
    ///
    /// The search term matches if name, description, OR the category label
    /// contains it, case-insensitively.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.matches(product.category) {
            return false;
        }
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term)
                    || product
                        .category
                        .as_str()
                        .to_lowercase()
                        .contains(&term)
            }
        }
    }
}
