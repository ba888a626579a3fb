//! One page of the product listing response.

use serde::{Deserialize, Serialize};

use crate::types::product::Product;

/// Fixed page size for the listing API.
pub const PAGE_SIZE: usize = 20;

/// One fixed-size slice of the filtered product collection.
///
/// Produced fresh per request, never persisted. `hasMore` holds exactly when
/// `(page + 1) * PAGE_SIZE < total`, and `nextPage` is present iff `hasMore`.
/// `total` is the post-filter count, not the full catalog size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page, in catalog order.
    pub products: Vec<Product>,
    /// Whether further pages exist for the same filter context.
    pub has_more: bool,
    /// Index of the next page, `null` on the wire when exhausted.
    pub next_page: Option<u32>,
    /// Count of all products matching the current filters.
    pub total: u64,
}

impl ProductPage {
    /// The empty zero-match page. A valid state, not an error.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            products: Vec::new(),
            has_more: false,
            next_page: None,
            total: 0,
        }
    }
}
