//! Store service - listing, lookup and creation of stores.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewStore, Store, StoreWithRating};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{StoreRepository, UserRepository};
use crate::types::StoreSort;

/// Store service trait for dependency injection.
#[async_trait]
pub trait StoreService: Send + Sync {
    /// All stores with rating aggregates
    async fn list_stores(&self, sort: StoreSort) -> AppResult<Vec<StoreWithRating>>;

    /// One store with its rating aggregate
    async fn get_store(&self, id: i32) -> AppResult<StoreWithRating>;

    /// Create a store, optionally assigning an existing user as owner
    async fn create_store(&self, store: NewStore) -> AppResult<Store>;
}

/// Concrete implementation of StoreService.
pub struct StoreManager {
    stores: Arc<dyn StoreRepository>,
    users: Arc<dyn UserRepository>,
}

impl StoreManager {
    pub fn new(stores: Arc<dyn StoreRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { stores, users }
    }
}

#[async_trait]
impl StoreService for StoreManager {
    async fn list_stores(&self, sort: StoreSort) -> AppResult<Vec<StoreWithRating>> {
        self.stores.list_with_ratings(sort).await
    }

    async fn get_store(&self, id: i32) -> AppResult<StoreWithRating> {
        self.stores
            .find_with_rating(id)
            .await?
            .ok_or_not_found("Store")
    }

    async fn create_store(&self, store: NewStore) -> AppResult<Store> {
        if let Some(owner_id) = store.owner_id {
            if self.users.find_by_id(owner_id).await?.is_none() {
                return Err(AppError::validation("Owner not found"));
            }
        }

        let created = self.stores.create(store).await?;
        tracing::info!(store_id = created.id, owner_id = ?created.owner_id, "Store created");
        Ok(created)
    }
}
