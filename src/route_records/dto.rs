use serde::Deserialize;
use uuid::Uuid;

/// Body of `POST /routes` and `PUT /routes/:id`.
#[derive(Debug, Deserialize)]
pub struct RouteRecordRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "userId", alias = "user_id")]
    pub user_id: Option<Uuid>,
}
