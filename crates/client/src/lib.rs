//! Shopfeed feed client.
//!
//! Everything the presentation layer needs to drive an infinite-scroll
//! product feed against the listing API:
//!
//! - [`source`] - The `ProductSource` seam: HTTP in production, a seeded
//!   in-memory fixture in tests
//! - [`cache`] - Per-filter-key response cache with in-flight deduplication
//! - [`controller`] - The feed state machine and its async driver
//! - [`filters`] - Staged search input and category selection
//! - [`sentinel`] - The scroll-marker visibility gate
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfeed_client::{CachedSource, Feed, HttpSource};
//! use shopfeed_core::CatalogFilter;
//!
//! let source = CachedSource::new(HttpSource::new("http://localhost:3000")?);
//! let mut feed = Feed::new(source);
//! feed.set_filter(CatalogFilter::default()).await;
//! while feed.controller().can_fetch_more() {
//!     feed.scroll_hit().await;
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod controller;
pub mod filters;
pub mod http;
pub mod sentinel;
pub mod source;

pub use cache::CachedSource;
pub use controller::{Feed, FeedController, FeedEvent, FeedPhase, FetchCommand};
pub use filters::{FilterPanel, MIN_SEARCH_LEN, SearchBox};
pub use http::HttpSource;
pub use sentinel::ScrollSentinel;
pub use source::{FixtureSource, PageQuery, ProductSource, SourceError};
