//! Backend REST gateway abstraction.
//!
//! The dashboard talks to the backend only through [`EntityGateway`], so
//! the list-view workflow can be driven by the HTTP implementation in
//! `awards-gateway` or by an in-memory stand-in in tests.

use async_trait::async_trait;

use crate::record::Record;

/// Failures talking to the backend.
///
/// The variants exist so logs can name the cause; callers treat all of them
/// the same way.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (connect, DNS, I/O).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request URL could not be built from the configured base.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// REST operations on one entity collection, addressed by its endpoint
/// segment (`/api/{endpoint}`).
#[async_trait]
pub trait EntityGateway: Send + Sync {
    /// `GET /api/{endpoint}`: the full collection in backend order.
    async fn list(&self, endpoint: &str) -> Result<Vec<Record>, GatewayError>;

    /// `POST /api/{endpoint}`. The response body is not used.
    async fn create(&self, endpoint: &str, record: &Record) -> Result<(), GatewayError>;

    /// `PUT /api/{endpoint}/{id}`.
    async fn update(&self, endpoint: &str, id: &str, record: &Record)
        -> Result<(), GatewayError>;

    /// `DELETE /api/{endpoint}/{id}`.
    async fn delete(&self, endpoint: &str, id: &str) -> Result<(), GatewayError>;
}
