//! HTTP API layer for pitchboard.
//!
//! - **Endpoints**: vote actions and startup pages under `/api`
//! - **Extractors**: the request's resolved session
//! - **Middleware**: bearer-token session resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
