use std::time::Duration;

// JWT configuration
pub const JWT_ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(24 * 60 * 60); // 24 hours
pub const JWT_MIN_SECRET_LENGTH: usize = 32;

// Database connection pool
pub const DB_MAX_CONNECTIONS: u32 = 20;
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;

// Fallback display strings for detail lookups that cannot resolve a reference
pub const UNKNOWN_MOVIE: &str = "Unknown Movie";
pub const UNKNOWN_THEATER: &str = "Unknown Theater";
pub const UNKNOWN_FIELD: &str = "Unknown";

// Timestamp format used inside booking detail payloads
pub const DETAIL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// Success messages
pub const SUCCESS_USER_CREATED: &str = "User created successfully";

// Error messages
pub const ERROR_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const ERROR_USERNAME_ALREADY_EXISTS: &str = "Username already exists";
pub const ERROR_SHOWING_NOT_FOUND: &str = "Showing not found";
pub const ERROR_INSUFFICIENT_PERMISSIONS: &str =
    "You don't have permission to perform this action.";
pub const ERROR_AUTHENTICATION_REQUIRED: &str = "Authentication credentials were not provided.";
