//! The data-source seam for the product feed.
//!
//! The feed controller never talks HTTP directly; it fetches pages through
//! [`ProductSource`]. Production wires in [`crate::HttpSource`] (usually
//! wrapped in [`crate::CachedSource`]); tests wire in [`FixtureSource`],
//! which answers from a fixed product list, so pagination and filter logic
//! are exercised independent of the network and of generator randomness.

use async_trait::async_trait;
use thiserror::Error;

use shopfeed_core::query::run_query;
use shopfeed_core::{CatalogFilter, Product, ProductPage};

/// One page request: the page index plus the filter context it belongs to.
///
/// `Hash + Eq` so it can key the response cache and the in-flight table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageQuery {
    /// Zero-based page index.
    pub page: u32,
    /// The filter context the page belongs to.
    pub filter: CatalogFilter,
}

impl PageQuery {
    /// Page 0 of a filter context.
    #[must_use]
    pub const fn first(filter: CatalogFilter) -> Self {
        Self { page: 0, filter }
    }
}

/// Errors a product source can produce.
///
/// Empty results are not errors; a zero-match page comes back `Ok`.
/// Variants hold rendered messages rather than source errors so results
/// can be shared out of the deduplicating cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body was not a valid page.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// An async provider of listing pages.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one page of the listing for `query`.
    async fn fetch_page(&self, query: &PageQuery) -> Result<ProductPage, SourceError>;
}

/// A deterministic in-memory source answering from a fixed product list.
///
/// Runs the same query logic the server does, so a feed driven against it
/// behaves exactly like one driven over HTTP minus latency and failures.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    products: Vec<Product>,
}

impl FixtureSource {
    /// Create a source over `products` (served in the given order).
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The backing products.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[async_trait]
impl ProductSource for FixtureSource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ProductPage, SourceError> {
        Ok(run_query(&self.products, &query.filter, query.page))
    }
}
