//! Persistence gateway. Handlers only see these traits; the PostgreSQL
//! implementation lives in [`pg`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::route_records::model::{NewRouteRecord, RouteRecord, RouteRecordChanges};
use crate::users::model::{NewUser, User, UserChanges};

#[cfg(test)]
pub mod memory;
pub mod pg;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key")]
    DuplicateKey,
    #[error("record not found")]
    NotFound,
    #[error("referenced record does not exist")]
    InvalidReference,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Fails with [`StoreError::DuplicateKey`] when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn list(&self) -> Result<Vec<RouteRecord>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RouteRecord>, StoreError>;
    async fn create(&self, route: NewRouteRecord) -> Result<RouteRecord, StoreError>;
    async fn update(&self, id: Uuid, changes: RouteRecordChanges)
        -> Result<RouteRecord, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
