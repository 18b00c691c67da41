//! Caseworks Server - case worker login and member registry API
//!
//! This library provides the HTTP layer of the Caseworks server: routing,
//! token checks on protected member endpoints, JSON error mapping and
//! request tracing. Business logic lives in `auth-identity` and
//! `member-registry`.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use config::Args;
pub use error::*;
pub use state::AppState;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span))
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(state)
}
