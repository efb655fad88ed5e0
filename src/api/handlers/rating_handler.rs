//! Rating handlers, nested under `/api/stores/:id/ratings`.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{ApiPath, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Rating, StoreRating};
use crate::errors::AppResult;

/// Rating submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitRatingRequest {
    /// Integer from 1 to 5; `rating` is accepted as an alias
    #[serde(alias = "rating")]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating_value: i32,
}

/// Create rating routes
pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ratings).post(submit_rating))
        .route("/me", get(my_rating))
}

/// Rate a store, replacing any earlier rating by the caller
#[utoipa::path(
    post,
    path = "/api/stores/{id}/ratings",
    tag = "Ratings",
    params(("id" = i32, Path, description = "Store ID")),
    request_body = SubmitRatingRequest,
    responses(
        (status = 200, description = "Rating saved", body = Rating),
        (status = 400, description = "Rating value out of range"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Store not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_rating(
    State(state): State<AppState>,
    ApiPath(store_id): ApiPath<i32>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<SubmitRatingRequest>,
) -> AppResult<Json<Rating>> {
    let rating = state
        .rating_service
        .submit_rating(store_id, user.id, payload.rating_value)
        .await?;

    Ok(Json(rating))
}

/// All ratings of a store, newest first
#[utoipa::path(
    get,
    path = "/api/stores/{id}/ratings",
    tag = "Ratings",
    params(("id" = i32, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Ratings with rater names", body = Vec<StoreRating>),
        (status = 404, description = "Store not found")
    )
)]
pub async fn list_ratings(
    State(state): State<AppState>,
    ApiPath(store_id): ApiPath<i32>,
) -> AppResult<Json<Vec<StoreRating>>> {
    let ratings = state.rating_service.list_ratings(store_id).await?;
    Ok(Json(ratings))
}

/// The caller's rating of a store
#[utoipa::path(
    get,
    path = "/api/stores/{id}/ratings/me",
    tag = "Ratings",
    params(("id" = i32, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Caller's rating", body = Rating),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Rating not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_rating(
    State(state): State<AppState>,
    ApiPath(store_id): ApiPath<i32>,
    user: CurrentUser,
) -> AppResult<Json<Rating>> {
    let rating = state
        .rating_service
        .get_user_rating(store_id, user.id)
        .await?;

    Ok(Json(rating))
}
