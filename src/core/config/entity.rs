use super::constant::*;
use crate::{
    circuitbreaker::{LoggingListener, Settings, TripStrategy},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    // app_name represents the name of current running service.
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            app_name: DEFAULT_APP_NAME.into(),
        }
    }
}

// ExporterConfig represents exporter settings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExporterConfig {
    pub addr: String,
    pub metrics_path: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            addr: EXPORTER_ADDR.into(),
            metrics_path: EXPORTER_METRICS_PATH.into(),
        }
    }
}

// LogConfig represent the configuration of logging.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub exporter: ExporterConfig,
    // config_file is the log4rs configuration, only read with feature `logger_log4rs`
    pub config_file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            exporter: ExporterConfig::default(),
            config_file: LOG_CONFIG_FILE.into(),
        }
    }
}

/// `BreakerConfig` is the declarative form of `Settings`.
/// Zero values follow the breaker defaults: `max_requests = 0` admits a single probe,
/// `interval_ms = 0` never resets the Closed counts and `timeout_ms = 0` waits 60 seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BreakerConfig {
    pub name: String,
    pub max_requests: u32,
    pub interval_ms: u64,
    pub timeout_ms: u64,
    pub trip: TripStrategy,
    // log_state_changes attaches a `LoggingListener` to the breaker
    pub log_state_changes: bool,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        BreakerConfig {
            name: String::new(),
            max_requests: 0,
            interval_ms: 0,
            timeout_ms: 0,
            trip: TripStrategy::default(),
            log_state_changes: true,
        }
    }
}

impl BreakerConfig {
    pub fn new<S: Into<String>>(name: S) -> Self {
        BreakerConfig {
            name: name.into(),
            ..BreakerConfig::default()
        }
    }

    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new(self.name.clone())
            .with_max_requests(self.max_requests)
            .with_interval(Duration::from_millis(self.interval_ms))
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_trip_strategy(self.trip.clone());
        if self.log_state_changes {
            settings = settings.with_state_change_listener(Arc::new(LoggingListener));
        }
        settings
    }

    pub fn is_valid(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::msg("empty breaker name"));
        }
        self.trip.is_valid()
    }
}

// BreakerSuiteConfig represent the general configuration of the breakers of a service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct BreakerSuiteConfig {
    pub app: AppConfig,
    pub log: LogConfig,
    pub breakers: Vec<BreakerConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigEntity {
    pub version: String,
    #[serde(default)]
    pub config: BreakerSuiteConfig,
}

impl Default for ConfigEntity {
    fn default() -> Self {
        ConfigEntity {
            version: SENTINEL_VERSION.into(),
            config: BreakerSuiteConfig::default(),
        }
    }
}

impl ConfigEntity {
    pub fn new() -> Self {
        ConfigEntity::default()
    }

    pub fn check(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(Error::msg("empty version"));
        }
        if self.config.app.app_name.is_empty() {
            return Err(Error::msg("empty app name"));
        }
        let mut names = HashSet::with_capacity(self.config.breakers.len());
        for breaker in &self.config.breakers {
            breaker.is_valid()?;
            if !names.insert(breaker.name.as_str()) {
                return Err(Error::msg(format!(
                    "duplicated breaker name {}",
                    breaker.name
                )));
            }
        }
        Ok(())
    }
}
