//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits, never on
//! SeaORM directly.

mod auth_service;
pub mod container;
mod dashboard_service;
mod rating_service;
mod store_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims, Registration};
pub use dashboard_service::{DashboardManager, DashboardService};
pub use rating_service::{RatingManager, RatingService};
pub use store_service::{StoreManager, StoreService};
pub use user_service::{UserManager, UserService};
