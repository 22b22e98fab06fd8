//! # Roster API
//!
//! REST server over the Roster services.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Request Lifecycle                                │
//! │                                                                         │
//! │  HTTP request                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TraceLayer (span per request)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Auth extractor: Bearer JWT → RequestContext                           │
//! │       {tenant_id, user_id, request_id}                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BaseService<E, Rules>  (fresh unit of work per request)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiResponse / ApiError envelope                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// The full application: routes, state and request tracing.
pub fn app(state: AppState) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}
