//! Render the product feed in the terminal.
//!
//! Drives the same feed machinery a browser page would: a cached HTTP
//! source, the feed controller, and the scroll sentinel.
//! "Scrolling" is simulated - after each rendered page the marker leaves
//! the viewport and comes back, which is exactly the visibility pattern the
//! sentinel gates on.

use shopfeed_client::{
    CachedSource, Feed, FeedPhase, FilterPanel, HttpSource, ProductSource, ScrollSentinel,
};
use shopfeed_core::{CategoryFilter, Product};

/// Browse the feed against the service at `base_url`.
///
/// `limit` is the number of pages to render, `None` for all of them.
///
/// # Errors
///
/// Returns an error for an invalid category, a too-short search term, or
/// a feed that stays failed after the retry policy runs out.
pub async fn browse(
    base_url: &str,
    search: Option<&str>,
    category: &str,
    limit: Option<u32>,
    retry: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let category: CategoryFilter = category.parse()?;

    // Stage the filters exactly like the feed's filter bar would.
    let mut panel = FilterPanel::default();
    let _ = panel.set_category(category);
    if let Some(term) = search {
        let _ = panel.set_search_input(term);
        if panel.submit_search().is_none() && !term.is_empty() {
            return Err(format!(
                "search term {term:?} is shorter than 3 characters"
            )
            .into());
        }
    }

    let source = CachedSource::new(HttpSource::new(base_url)?);
    let mut feed = Feed::new(source);

    println!("Loading products...");
    feed.set_filter(panel.filter()).await;

    if !ensure_loaded(&mut feed, retry).await? {
        return Ok(());
    }

    render_filters(&panel);
    let mut rendered = render_new_products(&feed, 0);

    let mut sentinel = ScrollSentinel::default();
    let mut pages_rendered: u32 = 1;
    loop {
        if let Some(limit) = limit
            && pages_rendered >= limit
        {
            break;
        }

        // The freshly rendered cards pushed the marker out of view; the
        // reader scrolling down brings it back.
        sentinel.observe(
            0.0,
            feed.controller().has_more(),
            feed.controller().is_fetching(),
        );
        if !sentinel.observe(
            1.0,
            feed.controller().has_more(),
            feed.controller().is_fetching(),
        ) {
            break;
        }

        println!();
        println!("Loading more products...");
        feed.scroll_hit().await;

        if let Some(error) = feed.controller().load_more_error() {
            println!("Failed to load more products: {error}");
            if !retry {
                return Err(error.to_string().into());
            }
            println!("Retrying...");
            feed.retry().await;
            if let Some(error) = feed.controller().load_more_error() {
                return Err(error.to_string().into());
            }
        }

        rendered = render_new_products(&feed, rendered);
        pages_rendered += 1;
    }

    println!();
    if feed.controller().has_more() {
        let shown = feed.controller().products().len();
        let total = feed.controller().total();
        println!("Showing {shown} of {total} products");
    } else {
        println!("You've reached the end! No more products to load.");
    }

    Ok(())
}

/// Wait out the initial load, applying the manual-retry policy.
/// Returns `false` when the feed settled on a valid empty state.
async fn ensure_loaded<S: ProductSource>(
    feed: &mut Feed<S>,
    retry: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if let FeedPhase::Failed(error) = feed.controller().phase() {
        println!("Failed to load products: {error}");
        if !retry {
            return Err(error.to_string().into());
        }
        println!("Retrying...");
        feed.retry().await;
    }
    if let FeedPhase::Failed(error) = feed.controller().phase() {
        return Err(error.to_string().into());
    }

    if feed.controller().total() == 0 {
        println!("No products match your filters.");
        return Ok(false);
    }
    Ok(true)
}

/// Print the active filters, like the filter bar's summary line.
fn render_filters(panel: &FilterPanel) {
    if !panel.has_active_filters() {
        return;
    }
    let filter = panel.filter();
    if let Some(term) = &filter.search {
        println!("Searching for: \"{term}\"");
    }
    if let Some(category) = filter.category.as_query_param() {
        println!("Category: {category}");
    }
}

/// Render products accumulated past `already_rendered`; returns the new
/// rendered count.
fn render_new_products<S: ProductSource>(feed: &Feed<S>, already_rendered: usize) -> usize {
    let products = feed.controller().products();
    let total = feed.controller().total();

    for product in products.iter().skip(already_rendered) {
        render_card(product);
    }
    println!();
    println!("-- {} of {total} products --", products.len());
    products.len()
}

/// One product card.
fn render_card(product: &Product) {
    let stock = if product.in_stock {
        "in stock"
    } else {
        "out of stock"
    };
    println!(
        "{}  ${:.2}  [{}]  {:.1}/5  ({stock})",
        product.name, product.price, product.category, product.rating
    );
    println!("    {}", product.description);
}
