//! Rating domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{MAX_RATING_VALUE, MIN_RATING_VALUE};
use crate::errors::{AppError, AppResult};

/// A user's score for a store. At most one per (store, user).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    pub id: i32,
    pub store_id: i32,
    pub user_id: i32,
    #[schema(minimum = 1, maximum = 5, example = 4)]
    pub rating_value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rating listed under a store, with the rater's name
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StoreRating {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub rating_value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Check a submitted value against the accepted range.
pub fn check_rating_value(value: i32) -> AppResult<i32> {
    if (MIN_RATING_VALUE..=MAX_RATING_VALUE).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "Rating must be between {} and {}",
            MIN_RATING_VALUE, MAX_RATING_VALUE
        )))
    }
}
