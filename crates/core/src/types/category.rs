//! The closed set of catalog categories and the category filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A catalog category.
///
/// The set is closed and the ordering of [`Category::ALL`] is load-bearing:
/// the generator assigns categories by index modulo this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Toys,
}

impl Category {
    /// All categories in generator cycling order.
    pub const ALL: [Self; 6] = [
        Self::Electronics,
        Self::Clothing,
        Self::Books,
        Self::HomeAndGarden,
        Self::Sports,
        Self::Toys,
    ];

    /// The display label, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Books => "Books",
            Self::HomeAndGarden => "Home & Garden",
            Self::Sports => "Sports",
            Self::Toys => "Toys",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Category selection for a listing query: a specific category or "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Matches every product. The wire form omits the `category` parameter
    /// (or sends the literal `all`).
    #[default]
    All,
    /// Exact-match on one category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == category,
        }
    }

    /// The `category` query parameter value, if one should be sent.
    #[must_use]
    pub const fn as_query_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Category::from_str(s).map(Self::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category.as_str()),
        }
    }
}
