//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::repository::UserRepository;
use crate::service::{UserManager, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection, absent when running on the in-memory store
    pub database: Option<Database>,
}

impl AppState {
    /// Create application state with a manually injected service.
    pub fn new(user_service: Arc<dyn UserService>, database: Option<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }

    /// Wire a [`UserManager`] over the given repository.
    pub fn from_repository(repo: Arc<dyn UserRepository>, database: Option<Database>) -> Self {
        Self::new(Arc::new(UserManager::new(repo)), database)
    }
}
