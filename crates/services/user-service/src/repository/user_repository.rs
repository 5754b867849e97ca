//! User repository contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set, Unchanged,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity, Model};
use common::{AppError, AppResult};
use domain::{NewUser, User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Inserts either assign a positive id that later fetches can see, or fail.
/// Updates and deletes of a missing id are left to the implementation; the
/// service always checks existence first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a new user, returning the id assigned by the store
    async fn insert(&self, user: NewUser) -> AppResult<UserId>;

    /// Persist every field of an existing user
    async fn update(&self, user: User) -> AppResult<()>;

    /// Permanently delete user if present
    async fn delete(&self, id: UserId) -> AppResult<()>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Decode a row, treating undefined role bits or enum codes as corruption
fn into_user(model: Model) -> AppResult<User> {
    let id = model.id;
    User::try_from(model)
        .map_err(|e| AppError::internal(format!("corrupt user row {}: {}", id, e)))
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(into_user).transpose()
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(into_user).collect()
    }

    async fn insert(&self, user: NewUser) -> AppResult<UserId> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(user.name),
            email: Set(user.email),
            roles: Set(i32::from(user.roles.bits())),
            status: Set(user.status.code()),
            action: Set(user.action.code()),
            created_at: Set(user.created_at),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(model.id)
    }

    async fn update(&self, user: User) -> AppResult<()> {
        // created_at stays Unchanged so it is never written after insert
        let active_model = ActiveModel {
            id: Unchanged(user.id),
            name: Set(user.name),
            email: Set(user.email),
            roles: Set(i32::from(user.roles.bits())),
            status: Set(user.status.code()),
            action: Set(user.action.code()),
            created_at: Unchanged(user.created_at),
        };

        active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> AppResult<()> {
        UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }
}
