//! User service - profile lookups and admin user management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserRole};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UserRepository;
use crate::types::UserSort;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List all users in the requested order
    async fn list_users(&self, sort: UserSort) -> AppResult<Vec<User>>;

    /// Change a user's role
    async fn update_role(&self, id: i32, role: UserRole) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_not_found("User")
    }

    async fn list_users(&self, sort: UserSort) -> AppResult<Vec<User>> {
        self.users.list(sort).await
    }

    async fn update_role(&self, id: i32, role: UserRole) -> AppResult<User> {
        let user = self
            .users
            .update_role(id, role)
            .await?
            .ok_or_not_found("User")?;

        tracing::info!(user_id = id, role = %role, "User role updated");
        Ok(user)
    }
}
