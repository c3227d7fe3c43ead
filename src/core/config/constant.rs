// default app settings
pub const SENTINEL_VERSION: &str = "v1";
pub const DEFAULT_APP_NAME: &str = "unknown_service";
pub const APP_NAME_ENV_KEY: &str = "SENTINEL_BREAKER_APP_NAME";
pub const CONF_FILE_PATH_ENV_KEY: &str = "SENTINEL_BREAKER_CONFIG_FILE_PATH";
pub const CONFIG_FILENAME: &str = "USE_DEFAULT_CONFIGURATION";

// default exporter settings
pub const EXPORTER_ADDR: &str = "127.0.0.1:9091";
pub const EXPORTER_METRICS_PATH: &str = "/metrics";

// default breaker settings
pub const DEFAULT_MAX_REQUESTS: u32 = 1;
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
// trips on more than 5 consecutive failures
pub const DEFAULT_TRIP_CONSECUTIVE_FAILURES: u32 = 6;

// default log settings
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const LOG_CONFIG_FILE: &str = "testdata/config/log4rs.yaml";
