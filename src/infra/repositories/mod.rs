//! Repository layer - Data access abstraction
//!
//! Each repository is a trait (so services can be tested against mocks or
//! fakes) plus a SeaORM implementation over the shared connection pool.

pub(crate) mod entities;
mod rating_repository;
mod store_repository;
mod user_repository;

pub use rating_repository::{RatingLedger, RatingRepository};
pub use store_repository::{StoreCatalog, StoreRepository};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use rating_repository::MockRatingRepository;
#[cfg(test)]
pub use store_repository::MockStoreRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

use crate::types::SortOrder;

/// Map a validated sort direction onto SeaORM's.
fn sea_order(order: SortOrder) -> sea_orm::Order {
    match order {
        SortOrder::Asc => sea_orm::Order::Asc,
        SortOrder::Desc => sea_orm::Order::Desc,
    }
}
