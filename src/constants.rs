//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body (1 MB)
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Length of the random refresh token handed to clients
pub const REFRESH_TOKEN_LENGTH: usize = 48;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 150;

// =============================================================================
// FIELD LIMITS
// =============================================================================

pub const MAX_NAME_LENGTH: u64 = 150;
pub const MAX_PHONE_LENGTH: u64 = 20;
pub const MAX_ADDRESS_LENGTH: u64 = 1000;
pub const MAX_REGION_LENGTH: u64 = 512;
pub const MAX_TITLE_LENGTH: u64 = 512;
pub const MAX_PARTICIPANT_CODE_LENGTH: u64 = 20;

// =============================================================================
// ROSTER
// =============================================================================

/// Query flag value that confirms attaching an existing user to a roster
pub const CONFIRM_FLAG: &str = "1";

/// Response message for a successful request
pub const MESSAGE_SUCCESS: &str = "Success";

/// Response message for a roster add that needs confirmation
pub const MESSAGE_PENDING: &str = "Pending";

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
