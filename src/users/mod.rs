mod dto;
pub mod handlers;
pub mod model;

use crate::state::AppState;
use axum::Router;

/// User CRUD. Protected.
pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
