//! Request DTOs for the product lookup API
//!
//! Defines query parameters and request bodies, plus EAN validation.

use serde::Deserialize;

use crate::fetch::Category;

/// Maximum accepted EAN length
pub const MAX_EAN_LENGTH: usize = 32;

/// Maximum number of EANs in one preload request
pub const MAX_PRELOAD_EANS: usize = 500;

/// Checks that `ean` looks like a barcode.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_ean(ean: &str) -> Option<String> {
    if ean.is_empty() {
        return Some("EAN cannot be empty".to_string());
    }
    if ean.len() > MAX_EAN_LENGTH {
        return Some(format!(
            "EAN exceeds maximum length of {} characters",
            MAX_EAN_LENGTH
        ));
    }
    if !ean.bytes().all(|b| b.is_ascii_digit()) {
        return Some(format!("EAN '{}' must contain only digits", ean));
    }
    None
}

/// Query string for GET /products/:ean
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Database to query, food when omitted
    #[serde(default)]
    pub category: Category,
}

/// Request body for POST /cache/preload
#[derive(Debug, Clone, Deserialize)]
pub struct PreloadRequest {
    /// EANs to check
    pub eans: Vec<String>,
}

impl PreloadRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.eans.len() > MAX_PRELOAD_EANS {
            return Some(format!(
                "Preload accepts at most {} EANs",
                MAX_PRELOAD_EANS
            ));
        }
        self.eans.iter().find_map(|ean| validate_ean(ean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ean() {
        assert!(validate_ean("3017620422003").is_none());
        assert!(validate_ean("").is_some());
        assert!(validate_ean("30176204x2003").is_some());
        assert!(validate_ean(&"1".repeat(MAX_EAN_LENGTH + 1)).is_some());
    }

    #[test]
    fn test_product_query_deserialize() {
        let query: ProductQuery = serde_json::from_str(r#"{"category": "beauty"}"#).unwrap();
        assert_eq!(query.category, Category::Beauty);

        let query: ProductQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.category, Category::Food);
    }

    #[test]
    fn test_preload_request_deserialize() {
        let json = r#"{"eans": ["111", "222"]}"#;
        let req: PreloadRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.eans, vec!["111", "222"]);
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_preload_request_rejects_bad_ean() {
        let req = PreloadRequest {
            eans: vec!["111".to_string(), "abc".to_string()],
        };
        assert!(req.validate().unwrap().contains("abc"));
    }
}
