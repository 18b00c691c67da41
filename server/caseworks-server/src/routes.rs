use crate::{
    handlers::{auth, clients, health, members},
    state::AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

/// Create health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create member registry routes
///
/// Listing, search and lookup require a bearer token (checked by the
/// `AuthContext` extractor); insert and duplicate check do not.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(members::list_members).post(members::add_member))
        .route("/members/check-duplicate", post(members::check_duplicate))
        .route("/members/search", get(members::search_members))
        .route("/members/:id", get(members::get_member))
}

/// Create client listing routes
pub fn client_routes() -> Router<AppState> {
    Router::new().route("/clients", get(clients::list_clients))
}

/// Create all API routes
pub fn create_routes() -> Router<AppState> {
    let api = Router::new()
        .merge(auth_routes())
        .merge(member_routes())
        .merge(client_routes());

    Router::new().merge(health_routes()).nest("/api", api)
}
