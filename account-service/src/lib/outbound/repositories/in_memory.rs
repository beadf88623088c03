use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::CreateUserParams;
use crate::domain::user::models::UpdateUserParams;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::StoreError;

/// Process-local user store with the same uniqueness rules as the
/// Postgres table (username and email).
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(&params.username) {
            return Err(StoreError::Conflict("username".to_string()));
        }
        if users.values().any(|u| u.email == params.email) {
            return Err(StoreError::Conflict("email".to_string()));
        }

        let user = User {
            username: params.username,
            hashed_password: params.hashed_password,
            full_name: params.full_name,
            email: params.email,
            password_changed_at: None,
            created_at: Utc::now(),
        };
        users.insert(user.username.clone(), user.clone());

        Ok(user)
    }

    async fn get_user(&self, username: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(username.to_string()))
    }

    async fn update_user(&self, params: UpdateUserParams) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if let Some(email) = &params.email {
            if users
                .values()
                .any(|u| &u.email == email && u.username != params.username)
            {
                return Err(StoreError::Conflict("email".to_string()));
            }
        }

        let user = users
            .get_mut(&params.username)
            .ok_or_else(|| StoreError::NotFound(params.username.clone()))?;

        if let Some(full_name) = params.full_name {
            user.full_name = full_name;
        }
        if let Some(hashed_password) = params.hashed_password {
            user.hashed_password = hashed_password;
        }
        if let Some(changed_at) = params.password_changed_at {
            user.password_changed_at = Some(changed_at);
        }
        if let Some(email) = params.email {
            user.email = email;
        }

        Ok(user.clone())
    }
}
