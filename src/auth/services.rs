use tracing::{info, warn};

use super::password::{hash_password_async, verify_dummy_async, verify_password_async};
use crate::{
    error::AppError,
    extract::required,
    state::AppState,
    store::StoreError,
    users::model::{NewUser, User},
};

/// Hashes the password and stores a new user. Shared by `/auth/register`
/// and `POST /users`.
pub async fn register_user(
    state: &AppState,
    email: Option<String>,
    name: Option<String>,
    password: Option<String>,
) -> Result<User, AppError> {
    let (Some(email), Some(password)) = (required(email), required(password)) else {
        return Err(AppError::validation("Email and password are required"));
    };

    let password_hash = hash_password_async(password).await?;

    match state
        .users
        .create(NewUser {
            email,
            name,
            password_hash,
        })
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "user registered");
            Ok(user)
        }
        Err(StoreError::DuplicateKey) => {
            warn!("registration with an email already in use");
            Err(AppError::Conflict("Email already exists".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks credentials. Unknown email and wrong password are indistinguishable.
pub async fn authenticate(
    state: &AppState,
    email: Option<String>,
    password: Option<String>,
) -> Result<User, AppError> {
    let (Some(email), Some(password)) = (required(email), required(password)) else {
        return Err(AppError::validation("Email and password are required"));
    };

    let Some(user) = state.users.find_by_email(&email).await? else {
        verify_dummy_async(password).await?;
        warn!("login for unknown email");
        return Err(AppError::Authentication);
    };

    if !verify_password_async(password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(AppError::Authentication);
    }

    Ok(user)
}
