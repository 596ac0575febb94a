//! Request and Response models for the product lookup API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_ean, PreloadRequest, ProductQuery};
pub use responses::{
    CachedResponse, HealthResponse, MessageResponse, PreloadResponse, ProductResponse,
    StatsResponse,
};
