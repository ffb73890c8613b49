//! HTTP client for the awards backend REST API.
//!
//! Implements [`awards_core::gateway::EntityGateway`] over `reqwest`
//! against the backend's `/api/{Entity}` collections.

pub mod client;

pub use client::RestGateway;
