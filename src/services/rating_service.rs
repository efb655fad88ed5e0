//! Rating service - submitting and reading store ratings.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{check_rating_value, Rating, StoreRating};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{RatingRepository, StoreRepository};

/// Rating service trait for dependency injection.
#[async_trait]
pub trait RatingService: Send + Sync {
    /// Create or overwrite the caller's rating of a store
    async fn submit_rating(&self, store_id: i32, user_id: i32, rating_value: i32)
        -> AppResult<Rating>;

    /// All ratings of a store
    async fn list_ratings(&self, store_id: i32) -> AppResult<Vec<StoreRating>>;

    /// The rating a user gave a store
    async fn get_user_rating(&self, store_id: i32, user_id: i32) -> AppResult<Rating>;
}

/// Concrete implementation of RatingService.
pub struct RatingManager {
    ratings: Arc<dyn RatingRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl RatingManager {
    pub fn new(ratings: Arc<dyn RatingRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { ratings, stores }
    }

    async fn ensure_store(&self, store_id: i32) -> AppResult<()> {
        if self.stores.exists(store_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Store"))
        }
    }
}

#[async_trait]
impl RatingService for RatingManager {
    async fn submit_rating(
        &self,
        store_id: i32,
        user_id: i32,
        rating_value: i32,
    ) -> AppResult<Rating> {
        let rating_value = check_rating_value(rating_value)?;
        self.ensure_store(store_id).await?;

        let rating = self.ratings.upsert(store_id, user_id, rating_value).await?;
        tracing::debug!(store_id, user_id, rating_value, "Rating saved");
        Ok(rating)
    }

    async fn list_ratings(&self, store_id: i32) -> AppResult<Vec<StoreRating>> {
        self.ensure_store(store_id).await?;
        self.ratings.list_for_store(store_id).await
    }

    async fn get_user_rating(&self, store_id: i32, user_id: i32) -> AppResult<Rating> {
        self.ratings
            .find_for_user(store_id, user_id)
            .await?
            .ok_or_not_found("Rating")
    }
}
