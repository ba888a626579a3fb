//! Print a generated catalog as JSON.
//!
//! With a seed the output is reproducible, which makes it usable as a
//! fixture for tests and for seeding other tooling.

use shopfeed_server::catalog::Catalog;

/// Generate `count` products and print them as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn generate(
    count: usize,
    seed: Option<u64>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::generate(count, seed);

    let json = if pretty {
        serde_json::to_string_pretty(catalog.products())?
    } else {
        serde_json::to_string(catalog.products())?
    };
    println!("{json}");

    Ok(())
}
