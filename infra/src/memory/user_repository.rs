//! In-memory user directory

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ak_core::domain::entities::user::{NewUser, User};
use ak_core::errors::{AuthError, DomainError};
use ak_core::repositories::UserRepository;

#[derive(Default)]
struct Directory {
    users: Vec<User>,
    next_id: i64,
}

/// User directory kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    directory: Arc<RwLock<Directory>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let directory = self.directory.read().await;
        Ok(directory.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let directory = self.directory.read().await;
        Ok(directory.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut directory = self.directory.write().await;

        if directory.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        directory.next_id += 1;
        let user = user.into_user(directory.next_id);
        directory.users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, DomainError> {
        let mut directory = self.directory.write().await;

        match directory.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.directory.read().await.users.clone())
    }
}
