use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::RouteRecordRequest,
    model::{NewRouteRecord, RouteRecord, RouteRecordChanges},
};
use crate::{
    error::AppError,
    extract::{required, ApiJson, ApiPath},
    state::AppState,
    store::StoreError,
};

pub fn route_record_routes() -> Router<AppState> {
    Router::new()
        .route("/routes", get(list_routes).post(create_route))
        .route(
            "/routes/:id",
            get(get_route).put(update_route).delete(delete_route),
        )
}

fn unknown_owner() -> AppError {
    AppError::validation("userId does not reference an existing user")
}

#[instrument(skip(state))]
pub async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<RouteRecord>>, AppError> {
    Ok(Json(state.routes.list().await?))
}

#[instrument(skip(state))]
pub async fn get_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<RouteRecord>, AppError> {
    state
        .routes
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Route not found"))
}

#[instrument(skip(state, payload))]
pub async fn create_route(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RouteRecordRequest>,
) -> Result<(StatusCode, Json<RouteRecord>), AppError> {
    let (Some(method), Some(url)) = (required(payload.method), required(payload.url)) else {
        return Err(AppError::validation("Method and url are required"));
    };
    let new = NewRouteRecord {
        method,
        url,
        name: payload.name,
        user_id: payload.user_id,
    };
    match state.routes.create(new).await {
        Ok(route) => {
            info!(route_id = %route.id, method = %route.method, url = %route.url, "route created");
            Ok((StatusCode::CREATED, Json(route)))
        }
        Err(StoreError::InvalidReference) => Err(unknown_owner()),
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state, payload))]
pub async fn update_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<RouteRecordRequest>,
) -> Result<Json<RouteRecord>, AppError> {
    let changes = RouteRecordChanges {
        method: required(payload.method),
        url: required(payload.url),
        name: payload.name,
        user_id: payload.user_id,
    };
    match state.routes.update(id, changes).await {
        Ok(route) => {
            info!(route_id = %route.id, "route updated");
            Ok(Json(route))
        }
        Err(StoreError::NotFound) => Err(AppError::NotFound("Route not found")),
        Err(StoreError::InvalidReference) => Err(unknown_owner()),
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state))]
pub async fn delete_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.routes.delete(id).await {
        Ok(()) => {
            info!(route_id = %id, "route deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound) => Err(AppError::NotFound("Route not found")),
        Err(e) => Err(e.into()),
    }
}
