//! Dashboard service - owner store dashboards and admin statistics.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{AdminStats, OwnerDashboard, StoreRatingSummary};
use crate::errors::{AppError, AppResult};
use crate::infra::{RatingRepository, StoreRepository, UserRepository};

/// Dashboard service trait for dependency injection.
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Dashboard for the owner's first store (lowest id)
    async fn owner_dashboard(&self, owner_id: i32) -> AppResult<OwnerDashboard>;

    /// Dashboards for every store the owner has
    async fn owner_stores(&self, owner_id: i32) -> AppResult<Vec<OwnerDashboard>>;

    /// User, store and rating totals
    async fn admin_stats(&self) -> AppResult<AdminStats>;
}

/// Concrete implementation of DashboardService.
pub struct DashboardManager {
    users: Arc<dyn UserRepository>,
    stores: Arc<dyn StoreRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl DashboardManager {
    pub fn new(
        users: Arc<dyn UserRepository>,
        stores: Arc<dyn StoreRepository>,
        ratings: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            users,
            stores,
            ratings,
        }
    }

    async fn dashboard(&self, summary: StoreRatingSummary) -> AppResult<OwnerDashboard> {
        let raters = self.ratings.raters_for_store(summary.id).await?;
        Ok(OwnerDashboard::new(summary, raters))
    }
}

#[async_trait]
impl DashboardService for DashboardManager {
    async fn owner_dashboard(&self, owner_id: i32) -> AppResult<OwnerDashboard> {
        let summary = self
            .stores
            .summaries_for_owner(owner_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("No store found for this owner.".to_string()))?;

        self.dashboard(summary).await
    }

    async fn owner_stores(&self, owner_id: i32) -> AppResult<Vec<OwnerDashboard>> {
        let summaries = self.stores.summaries_for_owner(owner_id).await?;

        let mut dashboards = Vec::with_capacity(summaries.len());
        for summary in summaries {
            dashboards.push(self.dashboard(summary).await?);
        }
        Ok(dashboards)
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        let (user_count, store_count, rating_count) = tokio::try_join!(
            self.users.count(),
            self.stores.count(),
            self.ratings.count()
        )?;

        Ok(AdminStats {
            user_count,
            store_count,
            rating_count,
        })
    }
}
