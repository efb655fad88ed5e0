//! Store-owner dashboard handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::OwnerDashboard;
use crate::errors::AppResult;

/// Create owner routes (mounted behind `auth_middleware` + `authorize(OWNER_ONLY)`)
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/stores", get(stores))
}

/// Dashboard for the owner's store
#[utoipa::path(
    get,
    path = "/api/owner/dashboard",
    tag = "Owner",
    responses(
        (status = 200, description = "Store aggregate and raters", body = OwnerDashboard),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Owner access required"),
        (status = 404, description = "No store found for this owner.")
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<OwnerDashboard>> {
    let dashboard = state.dashboard_service.owner_dashboard(user.id).await?;
    Ok(Json(dashboard))
}

/// Dashboards for every store the owner has
#[utoipa::path(
    get,
    path = "/api/owner/stores",
    tag = "Owner",
    responses(
        (status = 200, description = "One dashboard per store", body = Vec<OwnerDashboard>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Owner access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn stores(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<OwnerDashboard>>> {
    let dashboards = state.dashboard_service.owner_stores(user.id).await?;
    Ok(Json(dashboards))
}
