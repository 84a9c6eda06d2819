use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{RouteStore, StoreError, UserStore};
use crate::route_records::model::{NewRouteRecord, RouteRecord, RouteRecordChanges};
use crate::users::model::{NewUser, User, UserChanges};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    routes: HashMap<Uuid, RouteRecord>,
}

/// In-process gateway with the same constraint behaviour as the database:
/// unique email, route owner must exist, owner cleared on user delete.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().expect("memory store poisoned")
    }
}

fn sorted<T>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> OffsetDateTime) -> Vec<T> {
    let mut out: Vec<T> = items.collect();
    out.sort_by_key(|t| key(t));
    out
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut t = self.tables();
        if t.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateKey);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(sorted(self.tables().users.values().cloned(), |u| u.created_at))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        let mut t = self.tables();
        if let Some(email) = &changes.email {
            if t.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::DuplicateKey);
            }
        }
        let user = t.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(name) = changes.name {
            user.name = Some(name);
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut t = self.tables();
        t.users.remove(&id).ok_or(StoreError::NotFound)?;
        for route in t.routes.values_mut() {
            if route.user_id == Some(id) {
                route.user_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RouteStore for MemoryStore {
    async fn list(&self) -> Result<Vec<RouteRecord>, StoreError> {
        Ok(sorted(self.tables().routes.values().cloned(), |r| r.created_at))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RouteRecord>, StoreError> {
        Ok(self.tables().routes.get(&id).cloned())
    }

    async fn create(&self, route: NewRouteRecord) -> Result<RouteRecord, StoreError> {
        let mut t = self.tables();
        if let Some(owner) = route.user_id {
            if !t.users.contains_key(&owner) {
                return Err(StoreError::InvalidReference);
            }
        }
        let route = RouteRecord {
            id: Uuid::new_v4(),
            method: route.method,
            url: route.url,
            name: route.name,
            user_id: route.user_id,
            created_at: OffsetDateTime::now_utc(),
        };
        t.routes.insert(route.id, route.clone());
        Ok(route)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RouteRecordChanges,
    ) -> Result<RouteRecord, StoreError> {
        let mut t = self.tables();
        if let Some(owner) = changes.user_id {
            if !t.users.contains_key(&owner) {
                return Err(StoreError::InvalidReference);
            }
        }
        let route = t.routes.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(method) = changes.method {
            route.method = method;
        }
        if let Some(url) = changes.url {
            route.url = url;
        }
        if let Some(name) = changes.name {
            route.name = Some(name);
        }
        route.user_id = changes.user_id;
        Ok(route.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.tables()
            .routes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            name: None,
            password_hash: "$2b$10$placeholder".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_tagged() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("a@x.com")).await.unwrap();
        let err = UserStore::create(&store, new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("a@x.com")).await.unwrap();
        assert!(store.find_by_email("A@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("a@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_user_clears_route_owner() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, new_user("a@x.com")).await.unwrap();
        let route = RouteStore::create(
            &store,
            NewRouteRecord {
                method: "GET".into(),
                url: "/".into(),
                name: None,
                user_id: Some(user.id),
            },
        )
        .await
        .unwrap();

        UserStore::delete(&store, user.id).await.unwrap();
        let route = RouteStore::find_by_id(&store, route.id).await.unwrap().unwrap();
        assert_eq!(route.user_id, None);
    }

    #[tokio::test]
    async fn route_with_unknown_owner_is_rejected() {
        let store = MemoryStore::new();
        let err = RouteStore::create(
            &store,
            NewRouteRecord {
                method: "GET".into(),
                url: "/".into(),
                name: None,
                user_id: Some(Uuid::new_v4()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference));
    }
}
