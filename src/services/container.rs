//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through this container; the concrete
//! services are wired once from a database connection.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, DashboardManager, DashboardService, RatingManager, RatingService,
    StoreManager, StoreService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{
    RatingLedger, RatingRepository, StoreCatalog, StoreRepository, UserRepository, UserStore,
};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn stores(&self) -> Arc<dyn StoreService>;

    fn ratings(&self) -> Arc<dyn RatingService>;

    fn dashboards(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    store_service: Arc<dyn StoreService>,
    rating_service: Arc<dyn RatingService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Wire every service over the same set of repositories.
    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        stores: Arc<dyn StoreRepository>,
        ratings: Arc<dyn RatingRepository>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), config)),
            user_service: Arc::new(UserManager::new(users.clone())),
            store_service: Arc::new(StoreManager::new(stores.clone(), users.clone())),
            rating_service: Arc::new(RatingManager::new(ratings.clone(), stores.clone())),
            dashboard_service: Arc::new(DashboardManager::new(users, stores, ratings)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_repositories(
            Arc::new(UserStore::new(db.clone())),
            Arc::new(StoreCatalog::new(db.clone())),
            Arc::new(RatingLedger::new(db)),
            config,
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn stores(&self) -> Arc<dyn StoreService> {
        self.store_service.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingService> {
        self.rating_service.clone()
    }

    fn dashboards(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}
