use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod services;

/// Public endpoints: register and login.
pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}

/// Endpoints that must sit behind [`middleware::require_auth`].
pub fn protected_router() -> Router<AppState> {
    handlers::me_routes()
}
