//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, routing::put, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{AuthResponse, Registration};
use crate::types::{Created, MessageResponse};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User display name
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all required fields"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// User email address
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Please enter all required fields"),
        email(message = "Please enter a valid email")
    )]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// User password
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all required fields"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
    /// Postal address
    #[schema(example = "12 Market Street")]
    pub address: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all required fields"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all required fields"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all required fields"))]
    pub current_password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all required fields"))]
    pub new_password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/updatepassword", put(update_password))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Missing fields, bad email or user already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<AuthResponse>> {
    let response = state
        .auth_service
        .register(Registration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            address: payload.address,
        })
        .await?;

    Ok(Created(response))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(response))
}

/// Change the caller's password
#[utoipa::path(
    put,
    path = "/api/auth/updatepassword",
    tag = "Authentication",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Missing fields or incorrect current password"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_password(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .update_password(user.id, payload.current_password, payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
