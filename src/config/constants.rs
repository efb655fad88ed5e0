//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 1;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// JWT secret used by debug builds when JWT_SECRET is unset
pub const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

// =============================================================================
// User Roles
// =============================================================================

/// Regular user, the role every new account gets
pub const ROLE_USER: &str = "USER";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "ADMIN";

/// Store owner, sees the dashboard for their stores
pub const ROLE_OWNER: &str = "OWNER";

// =============================================================================
// Ratings
// =============================================================================

/// Lowest accepted rating value
pub const MIN_RATING_VALUE: i32 = 1;

/// Highest accepted rating value
pub const MAX_RATING_VALUE: i32 = 5;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// Database
// =============================================================================

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "password";
pub const DEFAULT_DB_NAME: &str = "store_rater";

// =============================================================================
// Response messages
// =============================================================================

/// Returned on any failed login, whichever half was wrong
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Returned when a sort column or direction is not allow-listed
pub const MSG_INVALID_SORT: &str = "Invalid sort parameters";

/// Returned when a role update names an unknown role
pub const MSG_INVALID_ROLE: &str = "Invalid role specified";

/// Opaque message for every 5xx response
pub const MSG_SERVER_ERROR: &str = "Server Error";
