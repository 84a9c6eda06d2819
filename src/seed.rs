//! Development fixtures: one known user owning a record for every endpoint.

use anyhow::Context;
use tracing::info;

use crate::{
    auth::password::hash_password_async,
    route_records::model::NewRouteRecord,
    store::{RouteStore, StoreError, UserStore},
    users::model::{NewUser, User},
};

pub const SEED_EMAIL: &str = "test@example.com";
pub const SEED_NAME: &str = "Test User";
pub const SEED_PASSWORD: &str = "password123";

/// `(method, url, name)` of every endpoint the API serves.
pub const SEED_ROUTES: [(&str, &str, &str); 13] = [
    ("GET", "/", "Root API Info"),
    ("POST", "/auth/register", "User Registration"),
    ("POST", "/auth/login", "User Login"),
    ("GET", "/users", "Get All Users"),
    ("GET", "/users/:id", "Get User by ID"),
    ("POST", "/users", "Create User"),
    ("PUT", "/users/:id", "Update User"),
    ("DELETE", "/users/:id", "Delete User"),
    ("GET", "/routes", "Get All Routes"),
    ("GET", "/routes/:id", "Get Route by ID"),
    ("POST", "/routes", "Create Route"),
    ("PUT", "/routes/:id", "Update Route"),
    ("DELETE", "/routes/:id", "Delete Route"),
];

/// Creates the seed user and its route records. Fails if the user already exists.
pub async fn run(users: &dyn UserStore, routes: &dyn RouteStore) -> anyhow::Result<User> {
    let password_hash = hash_password_async(SEED_PASSWORD.to_string()).await?;

    let user = match users
        .create(NewUser {
            email: SEED_EMAIL.to_string(),
            name: Some(SEED_NAME.to_string()),
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(StoreError::DuplicateKey) => {
            anyhow::bail!("{SEED_EMAIL} already exists; database is already seeded")
        }
        Err(e) => return Err(e).context("create seed user"),
    };
    info!(user_id = %user.id, email = %user.email, "created seed user");

    for (method, url, name) in SEED_ROUTES {
        let route = routes
            .create(NewRouteRecord {
                method: method.to_string(),
                url: url.to_string(),
                name: Some(name.to_string()),
                user_id: Some(user.id),
            })
            .await
            .with_context(|| format!("create seed route {method} {url}"))?;
        info!(route_id = %route.id, %method, %url, "created seed route");
    }

    Ok(user)
}
