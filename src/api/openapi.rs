//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, owner_handler, rating_handler, store_handler, user_handler,
};
use crate::domain::{
    AdminStats, OwnerDashboard, ProfileResponse, Rater, Rating, Store, StoreRating,
    StoreWithRating, UserListItem, UserResponse, UserRole,
};
use crate::services::AuthResponse;
use crate::types::{ApiResponse, MessageResponse};

/// OpenAPI documentation for the store rating API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store Rater",
        version = "0.1.0",
        description = "Register, rate stores and follow ratings as a store owner or admin"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::update_password,
        // User endpoints
        user_handler::profile,
        user_handler::admin_stuff,
        // Store endpoints
        store_handler::list_stores,
        store_handler::get_store,
        store_handler::create_store,
        // Rating endpoints
        rating_handler::submit_rating,
        rating_handler::list_ratings,
        rating_handler::my_rating,
        // Owner endpoints
        owner_handler::dashboard,
        owner_handler::stores,
        // Admin endpoints
        admin_handler::stats,
        admin_handler::list_users,
        admin_handler::get_user,
        admin_handler::update_role,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            ProfileResponse,
            UserListItem,
            Store,
            StoreWithRating,
            Rating,
            StoreRating,
            Rater,
            OwnerDashboard,
            AdminStats,
            // Request/response bodies
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::UpdatePasswordRequest,
            store_handler::CreateStoreRequest,
            rating_handler::SubmitRatingRequest,
            admin_handler::UpdateRoleRequest,
            AuthResponse,
            MessageResponse,
            ApiResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and password change"),
        (name = "Users", description = "The caller's own account"),
        (name = "Stores", description = "Store listing and creation"),
        (name = "Ratings", description = "Store ratings"),
        (name = "Owner", description = "Store owner dashboards"),
        (name = "Admin", description = "Statistics and user management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
