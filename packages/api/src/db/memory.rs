use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{AccountStore, StoreError};
use crate::models::{NewUser, User};

/// In-memory AccountStore for tests and database-less local runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryAccountStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, User>> {
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users();
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: Some(user.name),
            password_hash: user.password_hash,
            tahvel_cookie: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_tahvel_cookie(&self, id: Uuid, cookie: &str) -> Result<(), StoreError> {
        let mut users = self.users();
        let user = users.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        user.tahvel_cookie = Some(cookie.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn consume_tahvel_cookie(&self, id: Uuid) -> Result<Option<String>, StoreError> {
        let mut users = self.users();
        let user = users.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        user.updated_at = Utc::now();
        Ok(user.tahvel_cookie.take())
    }
}
