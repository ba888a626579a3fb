//! Per-filter-key response cache with in-flight deduplication.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use shopfeed_core::ProductPage;

use crate::source::{PageQuery, ProductSource, SourceError};

/// Cached pages expire after this long, matching the feed's staleness
/// tolerance.
const DEFAULT_TTL: Duration = Duration::from_secs(300); // 5 minutes

const MAX_CACHED_PAGES: u64 = 1000;

/// A `ProductSource` decorator that caches pages per `(filter, page)` key.
///
/// Concurrent fetches of the same key coalesce onto a single underlying
/// request - the in-flight deduplication table. Errors propagate to every
/// waiter but are never cached, so the next fetch retries the source.
#[derive(Clone)]
pub struct CachedSource<S> {
    source: Arc<S>,
    cache: Cache<PageQuery, ProductPage>,
}

impl<S> CachedSource<S> {
    /// Wrap `source` with the default TTL.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_ttl(source, DEFAULT_TTL)
    }

    /// Wrap `source` with a custom TTL.
    #[must_use]
    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self {
            source: Arc::new(source),
            cache: Cache::builder()
                .max_capacity(MAX_CACHED_PAGES)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Number of cached pages (approximate until pending tasks run).
    #[must_use]
    pub fn cached_pages(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every cached page.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl<S: ProductSource + 'static> ProductSource for CachedSource<S> {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ProductPage, SourceError> {
        let source = Arc::clone(&self.source);
        let key = query.clone();
        self.cache
            .try_get_with(key.clone(), async move {
                debug!(page = key.page, "cache miss, fetching from source");
                source.fetch_page(&key).await
            })
            .await
            .map_err(|shared: Arc<SourceError>| (*shared).clone())
    }
}
