//! User repository.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::sea_order;
use crate::domain::{NewUser, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::{UserSort, UserSortColumn};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user with the default role.
    ///
    /// A unique-index hit on email surfaces as `Conflict`.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Overwrite the stored password hash
    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<()>;

    /// Change a user's role; `None` when the user does not exist
    async fn update_role(&self, id: i32, role: UserRole) -> AppResult<Option<User>>;

    /// List all users in the requested order
    async fn list(&self, sort: UserSort) -> AppResult<Vec<User>>;

    /// Count all users
    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(column: UserSortColumn) -> user::Column {
    match column {
        UserSortColumn::Id => user::Column::Id,
        UserSortColumn::Name => user::Column::Name,
        UserSortColumn::Email => user::Column::Email,
        UserSortColumn::Role => user::Column::Role,
        UserSortColumn::CreatedAt => user::Column::CreatedAt,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            password: Set(new_user.password_hash),
            address: Set(new_user.address),
            role: Set(UserRole::User.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
                _ => AppError::from(e),
            }
        })?;

        User::try_from(model)
    }

    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Password, Expr::value(password_hash))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("User"));
        }

        Ok(())
    }

    async fn update_role(&self, id: i32, role: UserRole) -> AppResult<Option<User>> {
        let Some(existing) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.role = Set(role.as_str().to_string());

        let model = active.update(&self.db).await?;
        User::try_from(model).map(Some)
    }

    async fn list(&self, sort: UserSort) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by(sort_column(sort.column), sea_order(sort.order))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(User::try_from).collect()
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(UserEntity::find().count(&self.db).await?)
    }
}
