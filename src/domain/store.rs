//! Store domain entity and its aggregated views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Store {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Corner Bakery")]
    pub name: String,
    #[schema(example = "hello@cornerbakery.com")]
    pub email: String,
    pub address: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to insert a store
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub owner_id: Option<i32>,
}

/// Store row with its derived rating aggregate.
///
/// `average_rating` and `rating_count` are both zero for a store nobody rated.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StoreWithRating {
    #[serde(flatten)]
    pub store: Store,
    #[serde(rename = "averageRating")]
    #[schema(example = 4.25)]
    pub average_rating: f64,
    #[serde(rename = "ratingCount")]
    #[schema(example = 4)]
    pub rating_count: i64,
}

/// Store aggregate as seen from the owner dashboard, before rater lookup
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRatingSummary {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub average_rating: f64,
    pub rating_count: i64,
}

/// A user who rated a store
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Rater {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub rating_value: i32,
}

/// Owner dashboard for a single store
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerDashboard {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    /// Two-decimal string, e.g. "3.50"
    #[serde(rename = "averageRating")]
    #[schema(example = "3.50")]
    pub average_rating: String,
    #[serde(rename = "ratingCount")]
    pub rating_count: i64,
    pub raters: Vec<Rater>,
}

impl OwnerDashboard {
    pub fn new(summary: StoreRatingSummary, raters: Vec<Rater>) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            address: summary.address,
            average_rating: format!("{:.2}", summary.average_rating),
            rating_count: summary.rating_count,
            raters,
        }
    }
}

/// Application-wide counts for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub user_count: u64,
    pub store_count: u64,
    pub rating_count: u64,
}
