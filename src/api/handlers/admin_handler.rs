//! Admin handlers: statistics and user management.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{AdminStats, UserListItem, UserResponse, UserRole};
use crate::errors::AppResult;
use crate::types::SortQuery;

/// Role change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    /// USER, ADMIN or OWNER
    #[serde(default)]
    #[schema(example = "OWNER")]
    pub role: String,
}

/// Create admin routes (mounted behind `auth_middleware` + `authorize(ADMIN_ONLY)`)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user).put(update_role))
}

/// User, store and rating totals
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Application counts", body = AdminStats),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<AdminStats>> {
    let stats = state.dashboard_service.admin_stats().await?;
    Ok(Json(stats))
}

/// List every user
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    params(SortQuery),
    responses(
        (status = 200, description = "All users", body = Vec<UserListItem>),
        (status = 400, description = "Invalid sort parameters"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SortQuery>,
) -> AppResult<Json<Vec<UserListItem>>> {
    let sort = query.parse()?;
    let users = state.user_service.list_users(sort).await?;
    Ok(Json(users.into_iter().map(UserListItem::from).collect()))
}

/// Get one user
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 400, description = "Invalid role specified"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_role(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let role: UserRole = payload.role.parse()?;
    let user = state.user_service.update_role(id, role).await?;
    Ok(Json(UserResponse::from(user)))
}
