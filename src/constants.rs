//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
pub const APP_NAME: &str = "tinypost";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of entries kept in the request history
pub const MAX_HISTORY: usize = 20;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Placeholder shown in the structured view when a body is not JSON
pub const NOT_JSON_PLACEHOLDER: &str = "(Not JSON)";

/// Name of the environment seeded when none exist
pub const DEFAULT_ENV_NAME: &str = "default";

/// `base_url` written into the seeded default environment
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Log file written inside the data directory
pub const LOG_FILE_NAME: &str = "tinypost.log";

/// Overrides the data directory
pub const HOME_ENV_VAR: &str = "TINYPOST_HOME";

/// Overrides the request timeout (seconds)
pub const TIMEOUT_ENV_VAR: &str = "TINYPOST_TIMEOUT_SECS";
