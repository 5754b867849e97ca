//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user administration use cases only.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{
    NewUser, RoleSet, UpdateAction, UpdateRoles, UpdateStatus, User, UserId, UserInput,
    UserResponse, UserSummary,
};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Every operation does at most one read followed by one write against the
/// repository. Concurrent writes to the same user are last-writer-wins.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and create a user; the response carries the store-assigned id
    async fn add_user(&self, input: UserInput) -> AppResult<UserResponse>;

    /// List every user
    async fn get_all_users(&self) -> AppResult<Vec<UserResponse>>;

    /// Get user by ID; a missing user is `None`, not an error
    async fn get_user_by_id(&self, id: UserId) -> AppResult<Option<UserResponse>>;

    /// Overwrite name, email and roles of an existing user
    async fn update_user(&self, input: UserInput) -> AppResult<UserResponse>;

    /// Permanently delete a user
    async fn delete_user(&self, id: UserId) -> AppResult<()>;

    /// Replace the whole role set of a user
    async fn update_user_role(&self, request: UpdateRoles) -> AppResult<()>;

    /// Set the lifecycle status of a user
    async fn update_user_status(&self, request: UpdateStatus) -> AppResult<()>;

    /// Set the pending administrative action of a user
    async fn update_user_action(&self, request: UpdateAction) -> AppResult<()>;

    /// Aggregate counts over all users
    async fn get_summary(&self) -> AppResult<UserSummary>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Load an existing user or fail with `NotFound`
    async fn fetch_existing(&self, id: UserId) -> AppResult<User> {
        let user = self.repo.find_by_id(id).await?;
        if user.is_none() {
            warn!(user_id = id, "User not found");
        }
        user.ok_or_not_found(id)
    }

    /// Load an existing user, apply `mutate` and persist the full record
    async fn modify<F>(&self, id: UserId, mutate: F) -> AppResult<User>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut user = self.fetch_existing(id).await?;
        mutate(&mut user);
        self.repo.update(user.clone()).await?;
        Ok(user)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn add_user(&self, input: UserInput) -> AppResult<UserResponse> {
        if let Err(err) = input.check() {
            warn!(email = %input.email, "Rejected invalid user data");
            return Err(err.into());
        }

        // Postgres timestamptz keeps microseconds
        let new_user = NewUser::from_input(&input, Utc::now().trunc_subsecs(6));
        let id = self.repo.insert(new_user.clone()).await?;

        if id <= 0 {
            error!(email = %new_user.email, id, "Store assigned a non-positive user ID");
            return Err(AppError::operation_failed(format!(
                "failed to create user: store assigned ID {}",
                id
            )));
        }

        info!(user_id = id, "Successfully created user");
        Ok(UserResponse::from(User::from_new(id, new_user)))
    }

    async fn get_all_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repo.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_user_by_id(&self, id: UserId) -> AppResult<Option<UserResponse>> {
        let user = self.repo.find_by_id(id).await?;
        Ok(user.map(UserResponse::from))
    }

    async fn update_user(&self, input: UserInput) -> AppResult<UserResponse> {
        input.check()?;

        let user = self.modify(input.id, |user| user.apply_input(&input)).await?;

        info!(user_id = user.id, "Successfully updated user");
        Ok(UserResponse::from(user))
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        if id <= 0 {
            error!(user_id = id, "Attempted to delete user with invalid ID");
            return Err(AppError::invalid_argument(format!("Invalid user ID {}", id)));
        }

        self.fetch_existing(id).await?;
        self.repo.delete(id).await?;

        info!(user_id = id, "Successfully deleted user");
        Ok(())
    }

    async fn update_user_role(&self, request: UpdateRoles) -> AppResult<()> {
        if request.roles.is_empty() {
            error!(user_id = request.id, "Attempted to set an empty role list");
            return Err(AppError::invalid_argument("At least one role is required"));
        }

        let roles = RoleSet::combine(request.roles.iter().copied());
        self.modify(request.id, move |user| user.roles = roles).await?;

        info!(user_id = request.id, %roles, "Updated role for user");
        Ok(())
    }

    async fn update_user_status(&self, request: UpdateStatus) -> AppResult<()> {
        let status = request.status;
        self.modify(request.id, move |user| user.status = status).await?;

        info!(user_id = request.id, %status, "Updated status for user");
        Ok(())
    }

    async fn update_user_action(&self, request: UpdateAction) -> AppResult<()> {
        if request.id <= 0 {
            error!(user_id = request.id, "Attempted to update action with invalid ID");
            return Err(AppError::invalid_argument(format!(
                "Invalid user ID {}",
                request.id
            )));
        }

        let action = request.action;
        self.modify(request.id, move |user| user.action = action).await?;

        info!(user_id = request.id, %action, "Updated action for user");
        Ok(())
    }

    async fn get_summary(&self) -> AppResult<UserSummary> {
        let users = self.repo.list().await?;
        let summary = UserSummary::tally(&users);

        info!(users = users.len(), "Generated user summary");
        Ok(summary)
    }
}
