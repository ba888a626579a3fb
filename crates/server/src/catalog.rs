//! In-memory catalog generation.
//!
//! The catalog is generated once at startup. Identity fields (id, name,
//! description, category, image URL) are deterministic per index - three
//! fixed label sets cycled by index modulo - while price, rating, stock,
//! and creation time are randomized per call. Passing a seed makes the
//! randomized fields reproducible too, which the CLI fixture command and
//! the integration tests rely on.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shopfeed_core::{Category, Product};

/// Default number of generated products.
pub const DEFAULT_PRODUCT_COUNT: usize = 131;

/// Adjectives cycled into product names.
const ADJECTIVES: [&str; 7] = [
    "Premium", "Deluxe", "Essential", "Pro", "Ultra", "Smart", "Classic",
];

/// Product types cycled into names and descriptions.
const PRODUCT_TYPES: [&str; 28] = [
    "Headphones",
    "Laptop",
    "Phone",
    "Watch",
    "Camera",
    "Tablet",
    "Jacket",
    "Shoes",
    "Backpack",
    "Sunglasses",
    "Hat",
    "Novel",
    "Cookbook",
    "Guide",
    "Magazine",
    "Plant",
    "Chair",
    "Lamp",
    "Rug",
    "Vase",
    "Ball",
    "Racket",
    "Bike",
    "Weights",
    "Puzzle",
    "Game",
    "Doll",
    "Car",
];

/// Creation timestamps are spread uniformly over this window before now.
const CREATED_AT_WINDOW_MS: i64 = 10_000_000_000;

/// The generated product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Generate a catalog of `count` products.
    ///
    /// With a seed the catalog is fully deterministic; without one the
    /// randomized fields differ between runs.
    #[must_use]
    pub fn generate(count: usize, seed: Option<u64>) -> Self {
        let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let products = (0..count)
            .map(|index| generate_product(index, &mut rng))
            .collect();
        Self { products }
    }

    /// The products in generation order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Generate the product at `index`.
fn generate_product(index: usize, rng: &mut StdRng) -> Product {
    let category = Category::ALL[index % Category::ALL.len()];
    let adjective = ADJECTIVES[index % ADJECTIVES.len()];
    let product_type = PRODUCT_TYPES[index % PRODUCT_TYPES.len()];

    let price = round_to(rng.random_range(10.0..510.0), 2);
    let rating = round_to(rng.random_range(3.0..5.0), 1);
    let in_stock = rng.random::<f64>() > 0.1;
    let age_ms = rng.random_range(0..CREATED_AT_WINDOW_MS);

    Product {
        id: format!("product-{}", index + 1),
        name: format!("{adjective} {product_type}"),
        description: format!(
            "High-quality {} perfect for your needs. Features advanced \
             technology and premium materials.",
            product_type.to_lowercase()
        ),
        price,
        category,
        image_url: format!("https://picsum.photos/seed/{}/400/300", index + 1),
        rating,
        in_stock,
        created_at: Utc::now() - Duration::milliseconds(age_ms),
    }
}

/// Round to `decimals` decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
