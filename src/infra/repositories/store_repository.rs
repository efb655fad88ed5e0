//! Store repository.
//!
//! The aggregate reads are hand-written SQL: one `LEFT JOIN ratings` with
//! `AVG`/`COUNT`, so stores without ratings still come back with zeros.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, Set, Statement,
};

use super::entities::store::{ActiveModel, Entity as StoreEntity};
use crate::domain::{NewStore, Store, StoreRatingSummary, StoreWithRating};
use crate::errors::AppResult;
use crate::types::StoreSort;

#[cfg(test)]
use mockall::automock;

const STORE_AGGREGATE_SELECT: &str = r#"
    SELECT
        s.id,
        s.name,
        s.email,
        s.address,
        s.owner_id,
        s.created_at,
        COALESCE(AVG(r.rating_value), 0)::float8 AS average_rating,
        COUNT(r.id) AS rating_count
    FROM stores s
    LEFT JOIN ratings r ON s.id = r.store_id
"#;

const OWNER_SUMMARY_SQL: &str = r#"
    SELECT
        s.id,
        s.name,
        s.address,
        COALESCE(AVG(r.rating_value), 0)::float8 AS average_rating,
        COUNT(r.id) AS rating_count
    FROM stores s
    LEFT JOIN ratings r ON s.id = r.store_id
    WHERE s.owner_id = $1
    GROUP BY s.id
    ORDER BY s.id ASC
"#;

/// Store repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// All stores with their rating aggregate, in the requested order
    async fn list_with_ratings(&self, sort: StoreSort) -> AppResult<Vec<StoreWithRating>>;

    /// One store with its rating aggregate
    async fn find_with_rating(&self, id: i32) -> AppResult<Option<StoreWithRating>>;

    /// Whether a store with this ID exists
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Insert a store
    async fn create(&self, store: NewStore) -> AppResult<Store>;

    /// Rating aggregates for every store owned by `owner_id`, by store id
    async fn summaries_for_owner(&self, owner_id: i32) -> AppResult<Vec<StoreRatingSummary>>;

    /// Count all stores
    async fn count(&self) -> AppResult<u64>;
}

#[derive(Debug, FromQueryResult)]
struct StoreAggregateRow {
    id: i32,
    name: String,
    email: String,
    address: Option<String>,
    owner_id: Option<i32>,
    created_at: DateTime<Utc>,
    average_rating: f64,
    rating_count: i64,
}

impl From<StoreAggregateRow> for StoreWithRating {
    fn from(row: StoreAggregateRow) -> Self {
        StoreWithRating {
            store: Store {
                id: row.id,
                name: row.name,
                email: row.email,
                address: row.address,
                owner_id: row.owner_id,
                created_at: row.created_at,
            },
            average_rating: row.average_rating,
            rating_count: row.rating_count,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct OwnerSummaryRow {
    id: i32,
    name: String,
    address: Option<String>,
    average_rating: f64,
    rating_count: i64,
}

impl From<OwnerSummaryRow> for StoreRatingSummary {
    fn from(row: OwnerSummaryRow) -> Self {
        StoreRatingSummary {
            id: row.id,
            name: row.name,
            address: row.address,
            average_rating: row.average_rating,
            rating_count: row.rating_count,
        }
    }
}

/// SeaORM-backed implementation of StoreRepository
pub struct StoreCatalog {
    db: DatabaseConnection,
}

impl StoreCatalog {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Build the listing query. Only allow-listed identifiers are interpolated.
fn list_sql(sort: StoreSort) -> String {
    format!(
        "{STORE_AGGREGATE_SELECT} GROUP BY s.id ORDER BY {} {}, s.id ASC",
        sort.column.as_sql(),
        sort.order.as_sql()
    )
}

#[async_trait]
impl StoreRepository for StoreCatalog {
    async fn list_with_ratings(&self, sort: StoreSort) -> AppResult<Vec<StoreWithRating>> {
        let stmt = Statement::from_string(self.db.get_database_backend(), list_sql(sort));
        let rows = StoreAggregateRow::find_by_statement(stmt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(StoreWithRating::from).collect())
    }

    async fn find_with_rating(&self, id: i32) -> AppResult<Option<StoreWithRating>> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            format!("{STORE_AGGREGATE_SELECT} WHERE s.id = $1 GROUP BY s.id"),
            [id.into()],
        );
        let row = StoreAggregateRow::find_by_statement(stmt)
            .one(&self.db)
            .await?;

        Ok(row.map(StoreWithRating::from))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(StoreEntity::find_by_id(id).count(&self.db).await? > 0)
    }

    async fn create(&self, new_store: NewStore) -> AppResult<Store> {
        let active_model = ActiveModel {
            name: Set(new_store.name),
            email: Set(new_store.email),
            address: Set(new_store.address),
            owner_id: Set(new_store.owner_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Store::from(model))
    }

    async fn summaries_for_owner(&self, owner_id: i32) -> AppResult<Vec<StoreRatingSummary>> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            OWNER_SUMMARY_SQL,
            [owner_id.into()],
        );
        let rows = OwnerSummaryRow::find_by_statement(stmt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(StoreRatingSummary::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(StoreEntity::find().count(&self.db).await?)
    }
}
