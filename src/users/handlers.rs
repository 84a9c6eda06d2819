use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateUserRequest, UpdateUserRequest},
    model::{PublicUser, UserChanges},
};
use crate::{
    auth::{middleware::CurrentUser, services::register_user},
    error::AppError,
    extract::{ApiJson, ApiPath},
    state::AppState,
    store::StoreError,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<PublicUser>, AppError> {
    state
        .users
        .find_by_id(id)
        .await?
        .map(|u| Json(u.into()))
        .ok_or(AppError::NotFound("User not found"))
}

#[instrument(skip(state, actor, payload), fields(actor = %actor.0.id))]
pub async fn create_user(
    State(state): State<AppState>,
    actor: CurrentUser,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = register_user(&state, payload.email, payload.name, payload.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<PublicUser>, AppError> {
    if payload.email.as_deref() == Some("") {
        return Err(AppError::validation("Email must not be empty"));
    }
    let changes = UserChanges {
        email: payload.email,
        name: payload.name,
    };
    match state.users.update(id, changes).await {
        Ok(user) => {
            info!(user_id = %user.id, "user updated");
            Ok(Json(user.into()))
        }
        Err(StoreError::NotFound) => Err(AppError::NotFound("User not found")),
        Err(StoreError::DuplicateKey) => Err(AppError::Conflict("Email already exists".into())),
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.users.delete(id).await {
        Ok(()) => {
            info!(user_id = %id, "user deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound) => Err(AppError::NotFound("User not found")),
        Err(e) => Err(e.into()),
    }
}
