//! HTTP API handlers for simcheck-gw

pub mod check;
pub mod corpus;
pub mod error;
pub mod health;
pub mod report;
pub mod ui;

pub use error::{ApiError, ApiResult};
pub use health::health_routes;

use axum::extract::Request;

/// Whether the inbound request carries a multipart form body. Decided once
/// at the boundary; downstream code only sees the tagged submission.
pub(crate) fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false)
}
