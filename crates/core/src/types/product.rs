//! The product record served by the listing API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::category::Category;

/// A single catalog product.
///
/// Immutable once generated. Serialized field names are part of the wire
/// contract (`imageUrl`, `inStock`, `createdAt` are camelCase; `createdAt`
/// is an RFC 3339 timestamp; `price` and `rating` are JSON numbers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier (e.g. `product-42`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short marketing description.
    pub description: String,
    /// Price in the catalog currency. Always positive.
    pub price: f64,
    /// Catalog category.
    pub category: Category,
    /// Image URL for the product card.
    pub image_url: String,
    /// Average rating, 3.0 to 5.0.
    pub rating: f64,
    /// Whether the product is currently in stock.
    pub in_stock: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Product {
        Product {
            id: "product-1".to_string(),
            name: "Premium Headphones".to_string(),
            description: "High-quality headphones perfect for your needs."
                .to_string(),
            price: 129.99,
            category: Category::Electronics,
            image_url: "https://picsum.photos/seed/1/400/300".to_string(),
            rating: 4.5,
            in_stock: true,
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "id",
            "name",
            "description",
            "price",
            "category",
            "imageUrl",
            "rating",
            "inStock",
            "createdAt",
        ] {
            assert!(obj.contains_key(key), "missing wire field {key}");
        }
        assert_eq!(obj.len(), 9);
    }

    #[test]
    fn test_wire_field_types() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value["price"].is_f64());
        assert!(value["rating"].is_f64());
        assert!(value["inStock"].is_boolean());
        assert_eq!(value["category"], "Electronics");
        assert!(
            value["createdAt"].as_str().unwrap().starts_with("2026-03-14T"),
            "createdAt must be an RFC 3339 string"
        );
    }

    #[test]
    fn test_round_trip() {
        let product = sample();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }
}
