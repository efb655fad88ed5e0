//! Handlers for the caller's own account.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::middleware::{require_role, CurrentUser, ADMIN_ONLY};
use crate::api::AppState;
use crate::domain::ProfileResponse;
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Create user routes (mounted behind `auth_middleware`)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/admin-stuff", get(admin_stuff))
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "Users",
    responses(
        (status = 200, description = "Current user profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = state.user_service.get_user(user.id).await?;
    Ok(Json(ProfileResponse::from(user)))
}

/// Admin-only probe endpoint
#[utoipa::path(
    get,
    path = "/api/users/admin-stuff",
    tag = "Users",
    responses(
        (status = 200, description = "Caller is an admin", body = ApiResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_stuff(user: CurrentUser) -> AppResult<Json<ApiResponse>> {
    require_role(&user, ADMIN_ONLY)?;
    Ok(Json(ApiResponse::message("You have accessed admin-only content!")))
}
