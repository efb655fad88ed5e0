//! Domain layer - Core business entities and logic
//!
//! Users, stores and ratings plus the value objects and response shapes
//! built from them. Nothing here touches the database or HTTP.

pub mod password;
pub mod rating;
pub mod store;
pub mod user;

pub use password::Password;
pub use rating::{check_rating_value, Rating, StoreRating};
pub use store::{
    AdminStats, NewStore, OwnerDashboard, Rater, Store, StoreRatingSummary, StoreWithRating,
};
pub use user::{NewUser, ProfileResponse, User, UserListItem, UserResponse, UserRole};
