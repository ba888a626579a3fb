//! Core types for Shopfeed.
//!
//! All types serialize to the exact wire shapes of the listing API; field
//! renames live here so the other crates never hand-build JSON keys.

pub mod category;
pub mod filter;
pub mod page;
pub mod product;

pub use category::{Category, CategoryFilter, CategoryParseError};
pub use filter::CatalogFilter;
pub use page::{PAGE_SIZE, ProductPage};
pub use product::Product;
