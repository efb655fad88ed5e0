//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod rating;
pub mod store;
pub mod user;
