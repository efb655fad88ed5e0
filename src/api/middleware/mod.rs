//! API middleware.

mod auth;

pub use auth::{auth_middleware, authorize, require_role, CurrentUser, ADMIN_ONLY, OWNER_ONLY};
