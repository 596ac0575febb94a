//! Error types for the product lookup service
//!
//! Provides unified error handling using thiserror. The cache engine itself
//! never fails; these errors come from the upstream fetch and the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Lookup Error Enum ==
/// Unified error type for product lookups.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Upstream database has no product for this EAN
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream request failed, answered with an error status, or returned an unreadable body
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Upstream(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = match &self {
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LookupError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the lookup service.
pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (LookupError::NotFound("1".to_string()), StatusCode::NOT_FOUND),
            (LookupError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (LookupError::Upstream("down".to_string()), StatusCode::BAD_GATEWAY),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should map to correct HTTP status"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        let err = LookupError::NotFound("3017620422003".to_string());
        assert_eq!(err.to_string(), "Product not found: 3017620422003");
    }
}
