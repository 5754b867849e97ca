//! In-memory user store.
//!
//! Reference implementation of [`UserRepository`] used for local runs and
//! tests. Ids are assigned from 1 upward and never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::{NewUser, User, UserId};

use super::UserRepository;

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<UserId, User>,
    last_id: UserId,
}

/// [`UserRepository`] keeping users in an ordered map
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    state: RwLock<MemoryState>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn insert(&self, user: NewUser) -> AppResult<UserId> {
        let mut state = self.state.write().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::internal("user id space exhausted"))?;

        state.last_id = id;
        state.users.insert(id, User::from_new(id, user));
        Ok(id)
    }

    async fn update(&self, user: User) -> AppResult<()> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user;
                Ok(())
            }
            None => Err(AppError::NotFound(user.id)),
        }
    }

    async fn delete(&self, id: UserId) -> AppResult<()> {
        self.state.write().await.users.remove(&id);
        Ok(())
    }
}
