use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::StoreError;

#[derive(Debug, Default)]
struct Users {
    /// Map of user_id -> User
    by_id: HashMap<UserId, User>,
    /// Map of exact email -> user_id
    by_email: HashMap<String, UserId>,
}

/// Process-local credential store.
///
/// Reads run concurrently; `create` holds the write lock across the
/// uniqueness check and the insert.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Users>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.by_email.contains_key(user.email.as_str()) {
            return Err(StoreError::DuplicateUser(user.email.as_str().to_string()));
        }

        users
            .by_email
            .insert(user.email.as_str().to_string(), user.id);
        users.by_id.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, "User stored");

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.by_id.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.by_email.contains_key(email))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.users.read().await.by_id.len())
    }
}
