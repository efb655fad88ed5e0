//! JWT authentication and role authorization.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::api::AppState;
use crate::domain::UserRole;
use crate::errors::AppError;
use crate::services::Claims;

/// Role list for admin-only routes
pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];
/// Role list for store-owner routes
pub const OWNER_ONLY: &[UserRole] = &[UserRole::Owner];

/// Authenticated user decoded from the bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub role: UserRole,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
        }
    }
}

/// Handlers can take `CurrentUser` directly.
///
/// Reuses the identity `auth_middleware` already attached, otherwise verifies
/// the `Authorization: Bearer` header itself.
#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(*user);
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let claims = state.auth_service.verify_token(bearer.token())?;
        Ok(CurrentUser::from(claims))
    }
}

/// JWT authentication middleware.
///
/// Validates the bearer token, then injects the CurrentUser into the request
/// extensions for handlers and `authorize` further down.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();
    let user = CurrentUser::from_request_parts(&mut parts, &state).await?;
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Role gate, layered inside `auth_middleware`.
///
/// ```rust,ignore
/// router
///     .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, authorize))
///     .route_layer(middleware::from_fn_with_state(state, auth_middleware))
/// ```
pub async fn authorize(
    State(allowed): State<&'static [UserRole]>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;
    require_role(user, allowed)?;

    Ok(next.run(request).await)
}

/// Forbidden unless the user's role is in `allowed`.
pub fn require_role(user: &CurrentUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        tracing::debug!(user_id = user.id, role = %user.role, "Role not permitted");
        Err(AppError::Forbidden)
    }
}
