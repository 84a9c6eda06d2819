use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RouteStore, StoreError, UserStore};
use crate::route_records::model::{NewRouteRecord, RouteRecord, RouteRecordChanges};
use crate::users::model::{NewUser, User, UserChanges};

const USER_COLUMNS: &str = "id, email, name, password_hash, created_at";
const ROUTE_COLUMNS: &str = "id, method, url, name, user_id, created_at";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateKey,
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::InvalidReference
            }
            _ => StoreError::Other(anyhow::Error::new(err)),
        }
    }
}

/// PostgreSQL-backed gateway for both tables.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                name = COALESCE($3, name)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.email)
        .bind(changes.name)
        .fetch_optional(&self.db)
        .await?;
        user.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RouteStore for PgStore {
    async fn list(&self) -> Result<Vec<RouteRecord>, StoreError> {
        let rows = sqlx::query_as::<_, RouteRecord>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM main_routes ORDER BY created_at"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RouteRecord>, StoreError> {
        let row = sqlx::query_as::<_, RouteRecord>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM main_routes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn create(&self, route: NewRouteRecord) -> Result<RouteRecord, StoreError> {
        let row = sqlx::query_as::<_, RouteRecord>(&format!(
            r#"
            INSERT INTO main_routes (id, method, url, name, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ROUTE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&route.method)
        .bind(&route.url)
        .bind(&route.name)
        .bind(route.user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RouteRecordChanges,
    ) -> Result<RouteRecord, StoreError> {
        let row = sqlx::query_as::<_, RouteRecord>(&format!(
            r#"
            UPDATE main_routes
            SET method = COALESCE($2, method),
                url = COALESCE($3, url),
                name = COALESCE($4, name),
                user_id = $5
            WHERE id = $1
            RETURNING {ROUTE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.method)
        .bind(changes.url)
        .bind(changes.name)
        .bind(changes.user_id)
        .fetch_optional(&self.db)
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let res = sqlx::query("DELETE FROM main_routes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
