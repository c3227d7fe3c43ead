//! `circuitbreaker` module implements the circuit breaker pattern, which provides
//! stability and prevents cascading failures in distributed systems.
//!
//!  Circuit Breaker State Machine:
//!
//!                                switch to open when `ready_to_trip` holds
//!
//!             +-----------------------------------------------------------------------+
//!             |                                                                       |
//!             |                                                                       v
//!     +----------------+                   +----------------+  timeout elapsed +----------------+
//!     |                |                   |                |<-----------------|                |
//!     |                | max_requests      |                |                  |                |
//!     |     Closed     |<------------------|    HalfOpen    |                  |      Open      |
//!     |                | consecutive       |                |   Probe failed   |                |
//!     |                | successes         |                +----------------->|                |
//!     +----------------+                   +----------------+                  +----------------+
//!
//!  1. Closed: all calls pass. Outcomes are counted in `Counts`, which are cleared every
//!     `interval` if one is configured. A failure that makes `ready_to_trip` hold opens the breaker.
//!
//!  2. Open: all calls are rejected with `BlockType::BreakerOpen`. The first call at or after
//!     the timeout switches the breaker to Half-Open and passes as a probe.
//!
//!  3. Half-Open: at most `max_requests` probes are admitted, others are rejected with
//!     `BlockType::TooManyRequests`. One failed probe reopens the breaker,
//!     `max_requests` consecutive successes close it.
//!
//! Each transition (and each Closed window reset) mints a new `Generation`. `allow()` hands out
//! the current generation and `record_result()` ignores results carrying an older one.
//!
//! Time-based transitions are evaluated lazily when `allow()` is called, there is no timer thread.
//!
//! Listeners implementing `StateChangeListener` observe the state changes.

pub mod breaker;
pub mod counts;
pub mod executor;
pub mod listener;
pub mod manager;
pub mod settings;
pub mod state;

pub use breaker::*;
pub use counts::*;
pub use executor::*;
pub use listener::*;
pub use manager::*;
pub use settings::*;
pub use state::*;
