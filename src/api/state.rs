//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, HealthCheck};
use crate::services::{
    AuthService, DashboardService, RatingService, ServiceContainer, Services, StoreService,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Store service
    pub store_service: Arc<dyn StoreService>,
    /// Rating service
    pub rating_service: Arc<dyn RatingService>,
    /// Owner and admin dashboards
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Database liveness probe
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::new(&services, database)
    }

    /// Create application state from any service container.
    pub fn new(services: &dyn ServiceContainer, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            store_service: services.stores(),
            rating_service: services.ratings(),
            dashboard_service: services.dashboards(),
            health,
        }
    }
}
