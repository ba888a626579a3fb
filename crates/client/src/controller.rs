//! The feed state machine and its async driver.
//!
//! [`FeedController`] replaces the data-fetching hook with an explicit
//! transition function: every state change goes through [`FeedController::apply`],
//! which takes one of the feed events (filter change, scroll trigger, fetch
//! success, fetch failure, manual retry) and returns the fetch to perform,
//! if any. The controller owns no I/O, so the whole pagination protocol is
//! testable with plain synchronous calls.
//!
//! [`Feed`] pairs a controller with a [`ProductSource`] and executes the
//! commands. Stale-context handling needs no cancellation: each filter
//! context gets an epoch, and results carrying an old epoch are ignored.

use tracing::debug;

use shopfeed_core::{CatalogFilter, Product, ProductPage};

use crate::source::{PageQuery, ProductSource, SourceError};

/// Top-level feed phase: `Loading` until the first page of a context
/// arrives, then `Ready`; `Failed` when the initial load gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPhase {
    /// First page of the current filter context is being fetched.
    Loading,
    /// At least one page is showing. Further fetches may be in flight.
    Ready,
    /// The initial load failed (after the automatic retry).
    Failed(SourceError),
}

/// Events the presentation layer and the driver feed into the controller.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// The committed filter context changed; accumulated pages are invalid.
    FiltersChanged(CatalogFilter),
    /// The scroll marker became visible.
    ScrollHit,
    /// The user asked for a retry after a surfaced failure.
    RetryRequested,
    /// A page fetch completed.
    PageLoaded { epoch: u64, page: ProductPage },
    /// A page fetch failed.
    FetchFailed { epoch: u64, error: SourceError },
}

/// A fetch the driver must perform on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    /// Filter-context epoch to echo back with the result.
    pub epoch: u64,
    /// The page to fetch.
    pub query: PageQuery,
}

/// Explicit state machine for an infinite-scroll product feed.
///
/// Guarantees:
/// - at most one in-flight fetch per filter context ([`FeedEvent::ScrollHit`]
///   is a no-op while fetching or when no pages remain);
/// - results from a superseded filter context are ignored;
/// - accumulated products preserve server order with no duplicates;
/// - one automatic retry per failed attempt, then the failure surfaces and
///   waits for [`FeedEvent::RetryRequested`].
#[derive(Debug)]
pub struct FeedController {
    filter: CatalogFilter,
    epoch: u64,
    phase: FeedPhase,
    products: Vec<Product>,
    total: u64,
    has_more: bool,
    next_page: u32,
    fetching: bool,
    auto_retry_spent: bool,
    load_more_error: Option<SourceError>,
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedController {
    /// A controller with no filter context yet. Send
    /// [`FeedEvent::FiltersChanged`] to start the first load.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: CatalogFilter::default(),
            epoch: 0,
            phase: FeedPhase::Loading,
            products: Vec::new(),
            total: 0,
            has_more: false,
            next_page: 0,
            fetching: false,
            auto_retry_spent: false,
            load_more_error: None,
        }
    }

    /// Apply one event and return the fetch to perform, if any.
    pub fn apply(&mut self, event: FeedEvent) -> Option<FetchCommand> {
        match event {
            FeedEvent::FiltersChanged(filter) => self.on_filters_changed(filter),
            FeedEvent::ScrollHit => self.on_scroll_hit(),
            FeedEvent::RetryRequested => self.on_retry_requested(),
            FeedEvent::PageLoaded { epoch, page } => self.on_page_loaded(epoch, page),
            FeedEvent::FetchFailed { epoch, error } => self.on_fetch_failed(epoch, &error),
        }
    }

    fn on_filters_changed(&mut self, filter: CatalogFilter) -> Option<FetchCommand> {
        self.filter = filter;
        self.epoch += 1;
        self.products.clear();
        self.total = 0;
        self.has_more = false;
        self.next_page = 0;
        self.phase = FeedPhase::Loading;
        self.fetching = true;
        self.auto_retry_spent = false;
        self.load_more_error = None;
        debug!(epoch = self.epoch, "filter context changed, refetching from page 0");
        Some(self.command())
    }

    fn on_scroll_hit(&mut self) -> Option<FetchCommand> {
        // Duplicate-request guard: one in-flight fetch per context, and
        // nothing to do once the listing is exhausted.
        if self.fetching || !self.has_more || self.phase != FeedPhase::Ready {
            return None;
        }
        self.fetching = true;
        self.auto_retry_spent = false;
        self.load_more_error = None;
        Some(self.command())
    }

    fn on_retry_requested(&mut self) -> Option<FetchCommand> {
        let initial_failed = matches!(self.phase, FeedPhase::Failed(_));
        if !initial_failed && self.load_more_error.is_none() {
            return None;
        }
        if initial_failed {
            self.phase = FeedPhase::Loading;
        }
        self.fetching = true;
        self.auto_retry_spent = false;
        self.load_more_error = None;
        Some(self.command())
    }

    fn on_page_loaded(&mut self, epoch: u64, page: ProductPage) -> Option<FetchCommand> {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "ignoring page from stale context");
            return None;
        }
        self.fetching = false;
        self.auto_retry_spent = false;
        self.load_more_error = None;
        self.total = page.total;
        self.has_more = page.has_more;
        if let Some(next) = page.next_page {
            self.next_page = next;
        }
        self.products.extend(page.products);
        self.phase = FeedPhase::Ready;
        None
    }

    fn on_fetch_failed(&mut self, epoch: u64, error: &SourceError) -> Option<FetchCommand> {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "ignoring failure from stale context");
            return None;
        }
        if !self.auto_retry_spent {
            self.auto_retry_spent = true;
            debug!(%error, "fetch failed, retrying automatically");
            return Some(self.command());
        }
        self.fetching = false;
        if self.phase == FeedPhase::Loading {
            self.phase = FeedPhase::Failed(error.clone());
        } else {
            // Pages already on screen stay; only the load-more action failed.
            self.load_more_error = Some(error.clone());
        }
        None
    }

    fn command(&self) -> FetchCommand {
        FetchCommand {
            epoch: self.epoch,
            query: PageQuery {
                page: self.next_page,
                filter: self.filter.clone(),
            },
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &FeedPhase {
        &self.phase
    }

    /// The flattened, accumulated product list in server order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Total matches for the current filter context.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Whether further pages exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Whether a scroll trigger would start a fetch right now.
    #[must_use]
    pub fn can_fetch_more(&self) -> bool {
        !self.fetching && self.has_more && self.phase == FeedPhase::Ready
    }

    /// The failure of the last load-more attempt, if it gave up.
    #[must_use]
    pub const fn load_more_error(&self) -> Option<&SourceError> {
        self.load_more_error.as_ref()
    }

    /// The committed filter context.
    #[must_use]
    pub const fn filter(&self) -> &CatalogFilter {
        &self.filter
    }
}

/// A controller bound to a source: executes fetch commands and feeds the
/// results back in, following automatic-retry chains to completion.
#[derive(Debug)]
pub struct Feed<S> {
    source: S,
    controller: FeedController,
}

impl<S: ProductSource> Feed<S> {
    /// Create a feed over `source`. No fetch happens until
    /// [`Feed::set_filter`] establishes the first filter context.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            controller: FeedController::new(),
        }
    }

    /// Read access to the state machine.
    #[must_use]
    pub const fn controller(&self) -> &FeedController {
        &self.controller
    }

    /// Commit a new filter context and load its first page.
    pub async fn set_filter(&mut self, filter: CatalogFilter) {
        let command = self.controller.apply(FeedEvent::FiltersChanged(filter));
        self.run(command).await;
    }

    /// Signal that the scroll marker became visible. Returns `true` if a
    /// fetch ran.
    pub async fn scroll_hit(&mut self) -> bool {
        let command = self.controller.apply(FeedEvent::ScrollHit);
        let fetched = command.is_some();
        self.run(command).await;
        fetched
    }

    /// Manually retry after a surfaced failure. Returns `true` if a fetch
    /// ran.
    pub async fn retry(&mut self) -> bool {
        let command = self.controller.apply(FeedEvent::RetryRequested);
        let fetched = command.is_some();
        self.run(command).await;
        fetched
    }

    /// Execute commands until the controller settles.
    async fn run(&mut self, mut command: Option<FetchCommand>) {
        while let Some(cmd) = command {
            let event = match self.source.fetch_page(&cmd.query).await {
                Ok(page) => FeedEvent::PageLoaded {
                    epoch: cmd.epoch,
                    page,
                },
                Err(error) => FeedEvent::FetchFailed {
                    epoch: cmd.epoch,
                    error,
                },
            };
            command = self.controller.apply(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use shopfeed_core::query::run_query;
    use shopfeed_core::{Category, CategoryFilter, PAGE_SIZE};

    use crate::source::FixtureSource;

    fn products(count: usize) -> Vec<Product> {
        (0..count)
            .map(|index| Product {
                id: format!("product-{}", index + 1),
                name: format!("Item {index}"),
                description: String::new(),
                price: 10.0,
                category: Category::ALL[index % Category::ALL.len()],
                image_url: String::new(),
                rating: 4.0,
                in_stock: true,
                created_at: Utc::now(),
            })
            .collect()
    }

    fn page_for(catalog: &[Product], filter: &CatalogFilter, page: u32) -> ProductPage {
        run_query(catalog, filter, page)
    }

    fn transport_error() -> SourceError {
        SourceError::Transport("connection refused".to_string())
    }

    // -------------------------------------------------------------------
    // Pure state machine
    // -------------------------------------------------------------------

    #[test]
    fn test_filters_changed_commands_page_zero() {
        let mut controller = FeedController::new();
        let command = controller
            .apply(FeedEvent::FiltersChanged(CatalogFilter::default()))
            .expect("initial load must fetch");
        assert_eq!(command.query.page, 0);
        assert_eq!(*controller.phase(), FeedPhase::Loading);
        assert!(controller.is_fetching());
    }

    #[test]
    fn test_page_loaded_enters_ready() {
        let catalog = products(45);
        let mut controller = FeedController::new();
        let command = controller
            .apply(FeedEvent::FiltersChanged(CatalogFilter::default()))
            .unwrap();

        let page = page_for(&catalog, &CatalogFilter::default(), 0);
        let _ = controller.apply(FeedEvent::PageLoaded {
            epoch: command.epoch,
            page,
        });

        assert_eq!(*controller.phase(), FeedPhase::Ready);
        assert_eq!(controller.products().len(), PAGE_SIZE);
        assert_eq!(controller.total(), 45);
        assert!(controller.has_more());
        assert!(!controller.is_fetching());
    }

    #[test]
    fn test_scroll_hit_fetches_next_page() {
        let catalog = products(45);
        let filter = CatalogFilter::default();
        let mut controller = FeedController::new();
        let command = controller
            .apply(FeedEvent::FiltersChanged(filter.clone()))
            .unwrap();
        let _ = controller.apply(FeedEvent::PageLoaded {
            epoch: command.epoch,
            page: page_for(&catalog, &filter, 0),
        });

        let next = controller.apply(FeedEvent::ScrollHit).expect("has more");
        assert_eq!(next.query.page, 1);
    }

    #[test]
    fn test_scroll_hit_noop_while_fetching() {
        let mut controller = FeedController::new();
        let _ = controller.apply(FeedEvent::FiltersChanged(CatalogFilter::default()));
        // Initial fetch still in flight.
        assert!(controller.apply(FeedEvent::ScrollHit).is_none());
    }

    #[test]
    fn test_scroll_hit_noop_when_exhausted() {
        let catalog = products(5);
        let filter = CatalogFilter::default();
        let mut controller = FeedController::new();
        let command = controller
            .apply(FeedEvent::FiltersChanged(filter.clone()))
            .unwrap();
        let _ = controller.apply(FeedEvent::PageLoaded {
            epoch: command.epoch,
            page: page_for(&catalog, &filter, 0),
        });

        assert!(!controller.has_more());
        assert!(controller.apply(FeedEvent::ScrollHit).is_none());
    }

    #[test]
    fn test_stale_page_is_ignored_after_filter_change() {
        let catalog = products(45);
        let mut controller = FeedController::new();
        let old = controller
            .apply(FeedEvent::FiltersChanged(CatalogFilter::default()))
            .unwrap();

        // Filter changes while the old fetch is in flight.
        let books = CatalogFilter::category(CategoryFilter::Only(Category::Books));
        let _ = controller.apply(FeedEvent::FiltersChanged(books.clone()));

        // The old context's response arrives late and must be dropped.
        let _ = controller.apply(FeedEvent::PageLoaded {
            epoch: old.epoch,
            page: page_for(&catalog, &CatalogFilter::default(), 0),
        });
        assert!(controller.products().is_empty());
        assert_eq!(*controller.phase(), FeedPhase::Loading);
        assert_eq!(controller.filter(), &books);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut controller = FeedController::new();
        let old = controller
            .apply(FeedEvent::FiltersChanged(CatalogFilter::default()))
            .unwrap();
        let _ = controller.apply(FeedEvent::FiltersChanged(CatalogFilter::search("lamp")));

        let _ = controller.apply(FeedEvent::FetchFailed {
            epoch: old.epoch,
            error: transport_error(),
        });
        assert_eq!(*controller.phase(), FeedPhase::Loading);
    }

    #[test]
    fn test_first_failure_auto_retries_once() {
        let mut controller = FeedController::new();
        let command = controller
            .apply(FeedEvent::FiltersChanged(CatalogFilter::default()))
            .unwrap();

        let retry = controller
            .apply(FeedEvent::FetchFailed {
                epoch: command.epoch,
                error: transport_error(),
            })
            .expect("one automatic retry");
        assert_eq!(retry.query, command.query);

        // Second failure surfaces.
        let surfaced = controller.apply(FeedEvent::FetchFailed {
            epoch: retry.epoch,
            error: transport_error(),
        });
        assert!(surfaced.is_none());
        assert!(matches!(controller.phase(), FeedPhase::Failed(_)));
        assert!(!controller.is_fetching());
    }

    #[test]
    fn test_load_more_failure_keeps_accumulated_pages() {
        let catalog = products(45);
        let filter = CatalogFilter::default();
        let mut controller = FeedController::new();
        let command = controller
            .apply(FeedEvent::FiltersChanged(filter.clone()))
            .unwrap();
        let _ = controller.apply(FeedEvent::PageLoaded {
            epoch: command.epoch,
            page: page_for(&catalog, &filter, 0),
        });

        let next = controller.apply(FeedEvent::ScrollHit).unwrap();
        let _ = controller.apply(FeedEvent::FetchFailed {
            epoch: next.epoch,
            error: transport_error(),
        });
        let _ = controller.apply(FeedEvent::FetchFailed {
            epoch: next.epoch,
            error: transport_error(),
        });

        assert_eq!(*controller.phase(), FeedPhase::Ready);
        assert_eq!(controller.products().len(), PAGE_SIZE);
        assert!(controller.load_more_error().is_some());
    }

    #[test]
    fn test_manual_retry_after_failure() {
        let mut controller = FeedController::new();
        let command = controller
            .apply(FeedEvent::FiltersChanged(CatalogFilter::default()))
            .unwrap();
        for _ in 0..2 {
            let _ = controller.apply(FeedEvent::FetchFailed {
                epoch: command.epoch,
                error: transport_error(),
            });
        }
        assert!(matches!(controller.phase(), FeedPhase::Failed(_)));

        let retry = controller
            .apply(FeedEvent::RetryRequested)
            .expect("manual retry must fetch");
        assert_eq!(retry.query.page, 0);
        assert_eq!(*controller.phase(), FeedPhase::Loading);
    }

    #[test]
    fn test_retry_noop_without_failure() {
        let mut controller = FeedController::new();
        assert!(controller.apply(FeedEvent::RetryRequested).is_none());
    }

    #[test]
    fn test_success_resets_the_retry_budget() {
        let catalog = products(45);
        let filter = CatalogFilter::default();
        let mut controller = FeedController::new();
        let command = controller
            .apply(FeedEvent::FiltersChanged(filter.clone()))
            .unwrap();

        // First attempt burns the automatic retry, then succeeds.
        let _ = controller.apply(FeedEvent::FetchFailed {
            epoch: command.epoch,
            error: transport_error(),
        });
        let _ = controller.apply(FeedEvent::PageLoaded {
            epoch: command.epoch,
            page: page_for(&catalog, &filter, 0),
        });

        // The next attempt gets a fresh automatic retry.
        let next = controller.apply(FeedEvent::ScrollHit).unwrap();
        let auto = controller.apply(FeedEvent::FetchFailed {
            epoch: next.epoch,
            error: transport_error(),
        });
        assert!(auto.is_some());
    }

    // -------------------------------------------------------------------
    // Driver over sources
    // -------------------------------------------------------------------

    #[tokio::test]
    async fn test_feed_walks_the_whole_catalog() {
        let catalog = products(131);
        let mut feed = Feed::new(FixtureSource::new(catalog.clone()));

        feed.set_filter(CatalogFilter::default()).await;
        while feed.controller().can_fetch_more() {
            assert!(feed.scroll_hit().await);
        }

        let controller = feed.controller();
        assert_eq!(controller.products().len(), 131);
        assert_eq!(controller.total(), 131);

        let ids: Vec<_> = controller.products().iter().map(|p| &p.id).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len(), "no duplicates");
        let expected: Vec<_> = catalog.iter().map(|p| &p.id).collect();
        assert_eq!(ids, expected, "server order preserved");
    }

    #[tokio::test]
    async fn test_feed_filter_change_restarts_accumulation() {
        let catalog = products(131);
        let mut feed = Feed::new(FixtureSource::new(catalog));

        feed.set_filter(CatalogFilter::default()).await;
        feed.scroll_hit().await;
        assert_eq!(feed.controller().products().len(), 40);

        let books = CatalogFilter::category(CategoryFilter::Only(Category::Books));
        feed.set_filter(books).await;
        assert_eq!(feed.controller().total(), 22);
        assert_eq!(feed.controller().products().len(), 20);
        assert!(
            feed.controller()
                .products()
                .iter()
                .all(|p| p.category == Category::Books)
        );
    }

    #[tokio::test]
    async fn test_feed_zero_match_is_ready_not_failed() {
        let mut feed = Feed::new(FixtureSource::new(products(131)));
        feed.set_filter(CatalogFilter::search("zzz-no-match")).await;

        let controller = feed.controller();
        assert_eq!(*controller.phase(), FeedPhase::Ready);
        assert_eq!(controller.total(), 0);
        assert!(controller.products().is_empty());
        assert!(!controller.has_more());
    }

    /// Fails a scripted number of times, then delegates to a fixture.
    struct FlakySource {
        inner: FixtureSource,
        failures_left: Mutex<usize>,
        calls: AtomicUsize,
    }

    impl FlakySource {
        fn new(catalog: Vec<Product>, failures: usize) -> Self {
            Self {
                inner: FixtureSource::new(catalog),
                failures_left: Mutex::new(failures),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProductSource for FlakySource {
        async fn fetch_page(&self, query: &PageQuery) -> Result<ProductPage, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            {
                let mut left = self.failures_left.lock().unwrap();
                if *left > 0 {
                    *left -= 1;
                    return Err(transport_error());
                }
            }
            self.inner.fetch_page(query).await
        }
    }

    #[tokio::test]
    async fn test_feed_recovers_via_automatic_retry() {
        let mut feed = Feed::new(FlakySource::new(products(25), 1));
        feed.set_filter(CatalogFilter::default()).await;

        assert_eq!(*feed.controller().phase(), FeedPhase::Ready);
        assert_eq!(feed.controller().products().len(), 20);
        assert_eq!(feed.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_feed_surfaces_failure_then_manual_retry_recovers() {
        let mut feed = Feed::new(FlakySource::new(products(25), 2));
        feed.set_filter(CatalogFilter::default()).await;
        assert!(matches!(feed.controller().phase(), FeedPhase::Failed(_)));

        assert!(feed.retry().await);
        assert_eq!(*feed.controller().phase(), FeedPhase::Ready);
        assert_eq!(feed.controller().total(), 25);
    }
}
