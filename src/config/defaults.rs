/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./i18n-store.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CONNECT_TIMEOUT: &str = "5s";
pub const DEFAULT_ACQUIRE_TIMEOUT: &str = "3s";

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";

// Export cache defaults
pub const DEFAULT_CACHE_ENABLED: bool = true;
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
pub const DEFAULT_EXPORT_TTL: &str = "1h";

// Listing and search limits
pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;
pub const SEARCH_RESULT_LIMIT: u64 = 1000;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "I18N_STORE_";
