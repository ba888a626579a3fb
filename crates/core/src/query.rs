//! Filtering and fixed-size pagination over a catalog slice.
//!
//! This is the pure half of the listing service: given the full catalog,
//! a filter context, and a page index, produce the wire response. The
//! server calls it per request; tests call it directly to pin the page
//! arithmetic without HTTP in the way.

use crate::types::{CatalogFilter, PAGE_SIZE, Product, ProductPage};

/// Run a listing query against the catalog.
///
/// Products are matched in catalog order; the response carries the slice
/// `[page * PAGE_SIZE, page * PAGE_SIZE + PAGE_SIZE)` of the matches. A page
/// index past the end yields an empty page with the correct `total` - a
/// valid state, not an error.
#[must_use]
pub fn run_query(products: &[Product], filter: &CatalogFilter, page: u32) -> ProductPage {
    let start = page as usize * PAGE_SIZE;

    let mut total = 0usize;
    let mut window = Vec::new();
    for product in products.iter().filter(|p| filter.matches(p)) {
        if total >= start && window.len() < PAGE_SIZE {
            window.push(product.clone());
        }
        total += 1;
    }

    let has_more = (page as usize + 1) * PAGE_SIZE < total;
    ProductPage {
        products: window,
        has_more,
        next_page: if has_more { Some(page + 1) } else { None },
        total: total as u64,
    }
}
