//! Rating repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, Statement,
};

use super::entities::rating::{self, Entity as RatingEntity};
use crate::domain::{Rater, Rating, StoreRating};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

const UPSERT_SQL: &str = r#"
    INSERT INTO ratings (store_id, user_id, rating_value)
    VALUES ($1, $2, $3)
    ON CONFLICT (store_id, user_id)
    DO UPDATE SET rating_value = EXCLUDED.rating_value, updated_at = NOW()
    RETURNING id, store_id, user_id, rating_value, created_at, updated_at
"#;

const STORE_RATINGS_SQL: &str = r#"
    SELECT r.id, r.user_id, u.name AS user_name, r.rating_value, r.created_at, r.updated_at
    FROM ratings r
    JOIN users u ON u.id = r.user_id
    WHERE r.store_id = $1
    ORDER BY r.updated_at DESC, r.id DESC
"#;

const RATERS_SQL: &str = r#"
    SELECT u.id, u.name, u.email, r.rating_value
    FROM ratings r
    JOIN users u ON u.id = r.user_id
    WHERE r.store_id = $1
    ORDER BY r.updated_at DESC, r.id DESC
"#;

/// Rating repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert or overwrite the (store, user) rating in one statement
    async fn upsert(&self, store_id: i32, user_id: i32, rating_value: i32) -> AppResult<Rating>;

    /// The rating `user_id` gave `store_id`, if any
    async fn find_for_user(&self, store_id: i32, user_id: i32) -> AppResult<Option<Rating>>;

    /// Every rating of a store with the rater's name, most recent first
    async fn list_for_store(&self, store_id: i32) -> AppResult<Vec<StoreRating>>;

    /// Users who rated a store, most recent first
    async fn raters_for_store(&self, store_id: i32) -> AppResult<Vec<Rater>>;

    /// Count all ratings
    async fn count(&self) -> AppResult<u64>;
}

#[derive(Debug, FromQueryResult)]
struct StoreRatingRow {
    id: i32,
    user_id: i32,
    user_name: String,
    rating_value: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoreRatingRow> for StoreRating {
    fn from(row: StoreRatingRow) -> Self {
        StoreRating {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            rating_value: row.rating_value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct RaterRow {
    id: i32,
    name: String,
    email: String,
    rating_value: i32,
}

impl From<RaterRow> for Rater {
    fn from(row: RaterRow) -> Self {
        Rater {
            id: row.id,
            name: row.name,
            email: row.email,
            rating_value: row.rating_value,
        }
    }
}

/// SeaORM-backed implementation of RatingRepository
pub struct RatingLedger {
    db: DatabaseConnection,
}

impl RatingLedger {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(&self, sql: &str, store_id: i32) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, [store_id.into()])
    }
}

#[async_trait]
impl RatingRepository for RatingLedger {
    async fn upsert(&self, store_id: i32, user_id: i32, rating_value: i32) -> AppResult<Rating> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            UPSERT_SQL,
            [store_id.into(), user_id.into(), rating_value.into()],
        );

        RatingEntity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await?
            .map(Rating::from)
            .ok_or_else(|| AppError::internal("rating upsert returned no row"))
    }

    async fn find_for_user(&self, store_id: i32, user_id: i32) -> AppResult<Option<Rating>> {
        let model = RatingEntity::find()
            .filter(rating::Column::StoreId.eq(store_id))
            .filter(rating::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(model.map(Rating::from))
    }

    async fn list_for_store(&self, store_id: i32) -> AppResult<Vec<StoreRating>> {
        let rows = StoreRatingRow::find_by_statement(self.statement(STORE_RATINGS_SQL, store_id))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(StoreRating::from).collect())
    }

    async fn raters_for_store(&self, store_id: i32) -> AppResult<Vec<Rater>> {
        let rows = RaterRow::find_by_statement(self.statement(RATERS_SQL, store_id))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Rater::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(RatingEntity::find().count(&self.db).await?)
    }
}
