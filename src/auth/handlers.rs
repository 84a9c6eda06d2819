use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{error, info, instrument};

use super::{
    dto::{LoginRequest, RegisterRequest, TokenResponse},
    middleware::{CurrentUser, AUTH_COOKIE_NAME},
    services::{authenticate, register_user},
};
use crate::{
    config::TokenTransport, error::AppError, extract::ApiJson, state::AppState,
    users::model::PublicUser,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = register_user(&state, payload.email, payload.name, payload.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let user = authenticate(&state, payload.email, payload.password).await?;

    let token = state.keys.sign_access(&user).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        AppError::Internal(e)
    })?;

    let jar = match state.config.transport {
        TokenTransport::Cookie => {
            let max_age = time::Duration::seconds(state.keys.ttl().as_secs() as i64);
            let cookie = Cookie::build((AUTH_COOKIE_NAME, token.clone()))
                .http_only(true)
                .secure(state.config.production)
                .same_site(SameSite::Strict)
                .path("/")
                .max_age(max_age);
            jar.add(cookie)
        }
        TokenTransport::Bearer => jar,
    };

    info!(user_id = %user.id, "user logged in");
    Ok((jar, Json(TokenResponse { token })))
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}
