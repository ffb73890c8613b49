//! Shared response envelope types for API handlers.
//!
//! All JSON responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "outcome": O }`, for actions whose backend call may have
/// failed without the request itself failing.
#[derive(Debug, Serialize)]
pub struct OutcomeResponse<T: Serialize, O: Serialize> {
    pub data: T,
    pub outcome: O,
}
