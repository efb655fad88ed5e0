//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and health probe
//! - SeaORM entities and repositories

pub mod db;
pub mod repositories;

pub use db::{Database, HealthCheck, Migrator};
pub use repositories::{
    RatingLedger, RatingRepository, StoreCatalog, StoreRepository, UserRepository, UserStore,
};
