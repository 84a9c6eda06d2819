mod dto;
pub mod handlers;
pub mod model;

use crate::state::AppState;
use axum::Router;

/// Route record CRUD. Protected.
pub fn router() -> Router<AppState> {
    handlers::route_record_routes()
}
