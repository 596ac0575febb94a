//! Fetch Module
//!
//! Upstream product lookups. The cache never calls these itself; the lookup
//! service fetches on a miss and hands successful results to the cache.

mod open_food_facts;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::ProductPayload;
use crate::error::{LookupError, Result};

pub use open_food_facts::OpenFoodFactsClient;

/// Boxed future returned by [`ProductFetcher::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<ProductPayload>>> + Send + 'a>>;

// == Category ==
/// Product database to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Food,
    Beauty,
}

impl Category {
    /// Base URL of the database serving this category.
    pub fn base_url(&self) -> &'static str {
        match self {
            Category::Food => "https://world.openfoodfacts.org",
            Category::Beauty => "https://world.openbeautyfacts.org",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Food => write!(f, "food"),
            Category::Beauty => write!(f, "beauty"),
        }
    }
}

impl FromStr for Category {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "beauty" => Ok(Category::Beauty),
            other => Err(LookupError::InvalidRequest(format!(
                "Unknown category '{}'",
                other
            ))),
        }
    }
}

// == Product Fetcher ==
/// Fetches a product record from an upstream database.
pub trait ProductFetcher: Send + Sync {
    /// Returns `Ok(None)` when the database has no product for `ean`.
    fn fetch<'a>(&'a self, ean: &'a str, category: Category) -> FetchFuture<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_base_urls() {
        assert_eq!(Category::Food.base_url(), "https://world.openfoodfacts.org");
        assert_eq!(Category::Beauty.base_url(), "https://world.openbeautyfacts.org");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("Beauty".parse::<Category>().unwrap(), Category::Beauty);
        assert!(matches!(
            "toys".parse::<Category>(),
            Err(LookupError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&Category::Beauty).unwrap();
        assert_eq!(json, r#""beauty""#);
        let parsed: Category = serde_json::from_str(r#""food""#).unwrap();
        assert_eq!(parsed, Category::Food);
        assert_eq!(Category::default(), Category::Food);
    }
}
