use super::*;
use crate::{config::*, Error, Result};
use serde::{Deserialize, Serialize};
use std::error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Decides from the counts of the current Closed window whether the breaker should trip.
pub type ReadyToTripFn = dyn Fn(&Counts) -> bool + Send + Sync;

/// Decides whether an error returned by the protected operation counts as a success.
/// `Ok` outcomes are always successes.
pub type IsSuccessfulFn = dyn Fn(&(dyn error::Error + 'static)) -> bool + Send + Sync;

/// `TripStrategy` is a declarative `ready_to_trip` policy, the form used by configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStrategy {
    /// trips once `consecutive_failures >= threshold`
    ConsecutiveFailures { threshold: u32 },
    /// trips once at least `min_requests` were admitted
    /// and `total_failures / requests >= threshold`
    FailureRatio { min_requests: u32, threshold: f64 },
    /// trips if any of the inner strategies trips
    Any(Vec<TripStrategy>),
}

impl Default for TripStrategy {
    fn default() -> Self {
        TripStrategy::ConsecutiveFailures {
            threshold: DEFAULT_TRIP_CONSECUTIVE_FAILURES,
        }
    }
}

impl TripStrategy {
    pub fn ready_to_trip(&self, counts: &Counts) -> bool {
        match self {
            TripStrategy::ConsecutiveFailures { threshold } => {
                counts.consecutive_failures >= *threshold
            }
            TripStrategy::FailureRatio {
                min_requests,
                threshold,
            } => counts.requests >= *min_requests && counts.failure_ratio() >= *threshold,
            TripStrategy::Any(strategies) => strategies.iter().any(|s| s.ready_to_trip(counts)),
        }
    }

    pub fn is_valid(&self) -> Result<()> {
        match self {
            TripStrategy::ConsecutiveFailures { threshold } => {
                if *threshold == 0 {
                    return Err(Error::msg("invalid consecutive failures threshold"));
                }
            }
            TripStrategy::FailureRatio { threshold, .. } => {
                if !(*threshold > 0.0 && *threshold <= 1.0) {
                    return Err(Error::msg(format!(
                        "invalid failure ratio threshold {} (valid range: (0.0, 1.0])",
                        threshold
                    )));
                }
            }
            TripStrategy::Any(strategies) => {
                if strategies.is_empty() {
                    return Err(Error::msg("empty trip strategy list"));
                }
                for s in strategies {
                    s.is_valid()?;
                }
            }
        }
        Ok(())
    }
}

/// `Settings` configures a `CircuitBreaker`. It is consumed by `CircuitBreaker::new`
/// and cannot be changed afterwards.
#[derive(Clone)]
pub struct Settings {
    name: String,
    max_requests: u32,
    interval: Option<Duration>,
    timeout: Duration,
    trip_strategy: Option<TripStrategy>,
    ready_to_trip: Arc<ReadyToTripFn>,
    is_successful: Arc<IsSuccessfulFn>,
    listeners: Vec<Arc<dyn StateChangeListener>>,
}

impl Default for Settings {
    fn default() -> Self {
        let trip_strategy = TripStrategy::default();
        Settings {
            name: String::new(),
            max_requests: DEFAULT_MAX_REQUESTS,
            interval: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            ready_to_trip: strategy_fn(trip_strategy.clone()),
            trip_strategy: Some(trip_strategy),
            is_successful: Arc::new(|_: &(dyn error::Error + 'static)| false),
            listeners: Vec::new(),
        }
    }
}

fn strategy_fn(strategy: TripStrategy) -> Arc<ReadyToTripFn> {
    Arc::new(move |counts: &Counts| strategy.ready_to_trip(counts))
}

impl Settings {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Settings {
            name: name.into(),
            ..Settings::default()
        }
    }

    /// `max_requests` is the number of probes admitted in Half-Open,
    /// and the number of consecutive probe successes that close the breaker.
    /// 0 is treated as 1.
    pub fn with_max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = max_requests.max(1);
        self
    }

    /// `interval` is the cyclic period of the Closed state after which the counts are cleared.
    /// A zero interval disables the reset.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = if interval.is_zero() {
            None
        } else {
            Some(interval)
        };
        self
    }

    pub fn without_interval(mut self) -> Self {
        self.interval = None;
        self
    }

    /// `timeout` is the period of the Open state, after which the breaker starts probing.
    /// A zero timeout falls back to the default of 60 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            Duration::from_millis(DEFAULT_TIMEOUT_MS)
        } else {
            timeout
        };
        self
    }

    pub fn with_trip_strategy(mut self, strategy: TripStrategy) -> Self {
        self.ready_to_trip = strategy_fn(strategy.clone());
        self.trip_strategy = Some(strategy);
        self
    }

    /// `ready_to_trip` is called with a copy of the counts whenever a call fails in Closed state.
    pub fn with_ready_to_trip<F>(mut self, ready_to_trip: F) -> Self
    where
        F: Fn(&Counts) -> bool + Send + Sync + 'static,
    {
        self.ready_to_trip = Arc::new(ready_to_trip);
        self.trip_strategy = None;
        self
    }

    pub fn with_is_successful<F>(mut self, is_successful: F) -> Self
    where
        F: Fn(&(dyn error::Error + 'static)) -> bool + Send + Sync + 'static,
    {
        self.is_successful = Arc::new(is_successful);
        self
    }

    pub fn with_state_change_listener(mut self, listener: Arc<dyn StateChangeListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The declarative strategy, `None` when a custom `ready_to_trip` closure is used.
    pub fn trip_strategy(&self) -> Option<&TripStrategy> {
        self.trip_strategy.as_ref()
    }

    pub fn ready_to_trip(&self, counts: &Counts) -> bool {
        (self.ready_to_trip)(counts)
    }

    pub fn is_successful(&self, err: &(dyn error::Error + 'static)) -> bool {
        (self.is_successful)(err)
    }

    pub fn listeners(&self) -> &[Arc<dyn StateChangeListener>] {
        &self.listeners
    }

    /// `is_valid` checks the settings of a breaker that is going to be registered by name.
    pub fn is_valid(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::msg("empty breaker name"));
        }
        if let Some(strategy) = &self.trip_strategy {
            strategy.is_valid()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("name", &self.name)
            .field("max_requests", &self.max_requests)
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .field("trip_strategy", &self.trip_strategy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
