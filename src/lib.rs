#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![doc(html_logo_url = "https://avatars.githubusercontent.com/u/43955412")]

//! # Sentinel Circuit Breaker
//!
//! A circuit breaker protects callers from repeatedly invoking a failing resource.
//! Once failures cross the configured policy it fails fast, and after a timeout it lets
//! a bounded number of probes through to check whether the resource has recovered.
//!
//! Every admission hands out a generation token. Results reported under a generation
//! that has since been superseded are discarded, so a slow call that started before a
//! state change never perturbs the statistics of the new window.
//!
//! ## Add Dependency
//!
//! ```toml
//! [dependencies]
//! sentinel-breaker = { version = "0.1.0", features = ["full"] }
//! ```
//!
//! Optional features lists:
//! - async: Support asynchronous protected operations, see `CircuitBreaker::execute_async`.
//! - exporter: Export state changes and rejections to Prometheus.
//! - logger_env: Use `env_logger` to initialize logging.
//! - logger_log4rs: Use `log4rs` to initialize logging.
//!
//! ## Initialization
//!
//! The `api` module provides following interfaces:
//!
//! - `init_default()`: Load configurations from environment variable. For undefined configurations, use default values.
//! - `init_with_config_file(config_path: &mut String)`: Load configurations from a YAML file.
//! - `init_with_config(config_entity: ConfigEntity)`: Use hand-crafted `ConfigEntity` to initialize.
//!
//! Breakers declared in the configuration are registered in the global registry
//! and can be fetched by name with `circuitbreaker::get_breaker`.
//!
//! ## Protect a Call
//!
//! ```rust
//! use sentinel_breaker::circuitbreaker::{CircuitBreaker, Settings, TripStrategy};
//! use std::{io, time::Duration};
//!
//! fn call_external_api() -> Result<String, io::Error> {
//!     Ok("pong".into())
//! }
//!
//! let breaker = CircuitBreaker::new(
//!     Settings::new("external-api")
//!         .with_max_requests(3)
//!         .with_interval(Duration::from_secs(10))
//!         .with_timeout(Duration::from_secs(5))
//!         .with_trip_strategy(TripStrategy::ConsecutiveFailures { threshold: 5 }),
//! );
//! match breaker.execute(call_external_api) {
//!     Ok(body) => println!("passed: {}", body),
//!     Err(err) if err.is_blocked() => println!("rejected without calling the resource: {}", err),
//!     Err(err) => println!("the resource's own error, untouched: {}", err),
//! }
//! ```
//!
//! When the protected call cannot be wrapped in a closure, use `acquire()` and report
//! through the returned `Permit`. A permit that is dropped without being reported
//! counts as a failure.
//!
// This module is not intended to be part of the public API. In general, any
// `doc(hidden)` code is not part of the public and stable API.
#[macro_use]
#[doc(hidden)]
pub mod macros;

/// Initialization APIs.
pub mod api;
/// Core implementations: the circuit breaker state machine, its executor and registry,
/// the error types and the configuration.
pub mod core;
/// Adapters for different logging crates.
pub mod logging;
cfg_exporter! {
    /// Metric Exporter implementations. Currently, only Prometheus is supported.
    pub mod exporter;
}
// Utility functions.
pub mod utils;

// re-export precludes
pub use crate::core::*;
pub use api::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
