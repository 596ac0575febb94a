//! API Module
//!
//! HTTP handlers and routing for the product lookup REST API.
//!
//! # Endpoints
//! - `GET /products/:ean` - Look up a product through the cache
//! - `GET /cache/stats` - Cache statistics
//! - `GET|DELETE /cache/products/:ean` - Peek at or drop one cached product
//! - `DELETE /cache` - Clear the cache
//! - `POST /cache/preload` - Report uncached EANs
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
