//! Domain constants
//!
//! Centralized location for the fixed storage key names and the documented
//! API client defaults.

// Persisted session entries. The session store writes exactly these three
// keys and nothing else.
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "auth_token";
pub const STORAGE_KEY_REFRESH_TOKEN: &str = "refresh_token";
pub const STORAGE_KEY_USER: &str = "user";

// API client defaults, overridable via environment variables.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_REFRESH_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

// Header names and values sent on every request.
pub const AUTH_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_JSON: &str = "application/json";
