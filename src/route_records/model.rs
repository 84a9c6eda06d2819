use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A stored API endpoint description (`main_routes` table).
/// Serialized camelCase, the same shape `POST`/`PUT /routes` accept.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub id: Uuid,
    pub method: String,
    pub url: String,
    pub name: Option<String>,
    pub user_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub struct NewRouteRecord {
    pub method: String,
    pub url: String,
    pub name: Option<String>,
    pub user_id: Option<Uuid>,
}

/// `method`, `url` and `name` keep their value when `None`.
/// `user_id` is always written, so `None` clears the owner.
#[derive(Debug, Default)]
pub struct RouteRecordChanges {
    pub method: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
    pub user_id: Option<Uuid>,
}
