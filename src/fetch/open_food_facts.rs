//! Open Food Facts Client
//!
//! Reads product records from the Open Food Facts / Open Beauty Facts API.

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, warn};

use super::{Category, FetchFuture, ProductFetcher};
use crate::cache::ProductPayload;
use crate::error::Result;

/// HTTP client for the product databases.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    user_agent: String,
    /// Overrides the per-category base URL when set
    base_url: Option<String>,
}

impl OpenFoodFactsClient {
    /// Creates a client sending `user_agent` with a per-request `timeout`.
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            user_agent: user_agent.into(),
            base_url: None,
        })
    }

    /// Creates a client from service configuration.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Self::new(
            config.user_agent.clone(),
            Duration::from_secs(config.fetch_timeout_secs),
        )
    }

    /// Sends every request to `base_url` regardless of category.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Product endpoint for `ean`.
    pub fn product_url(&self, ean: &str, category: Category) -> String {
        let base = self.base_url.as_deref().unwrap_or(category.base_url());
        format!("{}/api/v0/product/{}.json", base.trim_end_matches('/'), ean)
    }

    async fn fetch_product(&self, ean: &str, category: Category) -> Result<Option<ProductPayload>> {
        let url = self.product_url(ean, category);
        debug!(%url, "Fetching product");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| {
                warn!(ean, error = %err, "Product request failed");
                err
            })?;

        let product: ProductPayload = response.json().await?;
        Ok(product_or_none(product))
    }
}

impl ProductFetcher for OpenFoodFactsClient {
    fn fetch<'a>(&'a self, ean: &'a str, category: Category) -> FetchFuture<'a> {
        Box::pin(self.fetch_product(ean, category))
    }
}

/// The API answers unknown products with `"status": 0`.
fn product_or_none(body: ProductPayload) -> Option<ProductPayload> {
    match body.get("status").and_then(|s| s.as_i64()) {
        Some(0) => None,
        _ => Some(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::error::LookupError;
    use crate::lookup::ProductLookup;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client() -> OpenFoodFactsClient {
        OpenFoodFactsClient::new("product-cache-tests/0.1", Duration::from_secs(1)).unwrap()
    }

    /// Local upstream answering every request with `status` and a JSON `body`.
    async fn serve_fixed(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_product_url_per_category() {
        let client = client();
        assert_eq!(
            client.product_url("3017620422003", Category::Food),
            "https://world.openfoodfacts.org/api/v0/product/3017620422003.json"
        );
        assert_eq!(
            client.product_url("3600523614486", Category::Beauty),
            "https://world.openbeautyfacts.org/api/v0/product/3600523614486.json"
        );
    }

    #[test]
    fn test_product_url_with_base_override() {
        let client = client().with_base_url("http://localhost:9999/");
        assert_eq!(
            client.product_url("111", Category::Beauty),
            "http://localhost:9999/api/v0/product/111.json"
        );
    }

    #[test]
    fn test_status_zero_is_unknown_product() {
        assert_eq!(product_or_none(json!({"status": 0, "code": "111"})), None);
    }

    #[test]
    fn test_found_product_is_kept_verbatim() {
        let body = json!({"status": 1, "product": {"product_name": "Nutella"}});
        assert_eq!(product_or_none(body.clone()), Some(body));

        let no_status = json!({"product": {}});
        assert_eq!(product_or_none(no_status.clone()), Some(no_status));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_error() {
        let client = client().with_base_url("http://127.0.0.1:1");
        let result = client.fetch("111", Category::Food).await;
        assert!(matches!(result, Err(LookupError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_ok_response_is_parsed() {
        let base = serve_fixed("200 OK", r#"{"status":1,"product":{"product_name":"Nutella"}}"#).await;
        let client = client().with_base_url(base);

        let product = client.fetch("111", Category::Food).await.unwrap();
        assert_eq!(product.unwrap()["product"]["product_name"], "Nutella");
    }

    #[tokio::test]
    async fn test_server_error_status_is_upstream_error() {
        let base = serve_fixed("503 Service Unavailable", r#"{"error":"service unavailable"}"#).await;
        let client = client().with_base_url(base);

        let result = client.fetch("111", Category::Food).await;
        assert!(matches!(result, Err(LookupError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_server_error_body_is_not_cached() {
        let base = serve_fixed("503 Service Unavailable", r#"{"error":"service unavailable"}"#).await;
        let client = client().with_base_url(base);
        let lookup = ProductLookup::with_config(CacheConfig::default(), Arc::new(client));

        let result = lookup.lookup("111", Category::Food).await;
        assert!(matches!(result, Err(LookupError::Upstream(_))));
        assert!(!lookup.is_cached("111").await);
        assert_eq!(lookup.stats().await.total_items, 0);
    }
}
