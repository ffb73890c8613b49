use std::sync::Arc;

use awards_core::dashboard::Dashboard;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// One list page per managed entity.
    pub dashboard: Arc<Dashboard>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
