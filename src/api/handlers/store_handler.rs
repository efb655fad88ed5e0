//! Store handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::rating_handler::rating_routes;
use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::middleware::{require_role, CurrentUser, ADMIN_ONLY};
use crate::api::AppState;
use crate::domain::{NewStore, Store, StoreWithRating};
use crate::errors::AppResult;
use crate::types::{Created, SortQuery};

/// Store creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all required fields"))]
    #[schema(example = "Corner Bakery")]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Please enter all required fields"),
        email(message = "Please enter a valid email")
    )]
    #[schema(example = "hello@cornerbakery.com")]
    pub email: String,
    pub address: Option<String>,
    /// Owning user; a number or numeric string, empty for none
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 2)]
    pub owner_id: Option<i32>,
}

/// Accept `12`, `"12"`, `""` or `null` for an optional id.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom("ownerId must be an integer")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| D::Error::custom("ownerId must be an integer")),
        Some(_) => Err(D::Error::custom("ownerId must be an integer")),
    }
}

/// Create store routes, ratings nested under each store
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores).post(create_store))
        .route("/:id", get(get_store))
        .nest("/:id/ratings", rating_routes())
}

/// List stores with rating aggregates
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "Stores",
    params(SortQuery),
    responses(
        (status = 200, description = "All stores", body = Vec<StoreWithRating>),
        (status = 400, description = "Invalid sort parameters")
    )
)]
pub async fn list_stores(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SortQuery>,
) -> AppResult<Json<Vec<StoreWithRating>>> {
    let sort = query.parse()?;
    let stores = state.store_service.list_stores(sort).await?;
    Ok(Json(stores))
}

/// Get one store with its rating aggregate
#[utoipa::path(
    get,
    path = "/api/stores/{id}",
    tag = "Stores",
    params(("id" = i32, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store found", body = StoreWithRating),
        (status = 404, description = "Store not found")
    )
)]
pub async fn get_store(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<StoreWithRating>> {
    let store = state.store_service.get_store(id).await?;
    Ok(Json(store))
}

/// Create a store (admin only)
#[utoipa::path(
    post,
    path = "/api/stores",
    tag = "Stores",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created", body = Store),
        (status = 400, description = "Missing fields or owner not found"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_store(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateStoreRequest>,
) -> AppResult<Created<Store>> {
    require_role(&user, ADMIN_ONLY)?;

    let store = state
        .store_service
        .create_store(NewStore {
            name: payload.name,
            email: payload.email,
            address: payload.address,
            owner_id: payload.owner_id,
        })
        .await?;

    Ok(Created(store))
}
